//! Resource import for the target document
//!
//! This module handles:
//! - Discovering resource packages in a working directory ([`discovery`])
//! - Scoped opening and closing of each package ([`subdocument`])
//! - Transactional merging of definitions into the target ([`merge`])
//! - Persisting the assembled document ([`writer`])
//! - Orchestrating a whole run ([`pipeline`])

pub mod discovery;
pub mod merge;
pub mod pipeline;
pub mod subdocument;
pub mod writer;

pub use discovery::{DiscoveredResource, GlobDiscovery, ResourceDiscovery};
pub use merge::{ContentMerger, MergeResult};
pub use pipeline::ImportPipeline;
pub use subdocument::SubDocumentContext;
pub use writer::ArtifactWriter;
