//! Domain models for family-loader
//!
//! This module contains the document model the pipeline assembles:
//! the target document, the content definitions merged into it, and the
//! placement instances created from their variants.
//! These types carry no I/O; reading packages and writing artifacts live elsewhere.

pub mod definition;
pub mod document;
pub mod outcome;
pub mod placement;

pub use definition::{ContentDefinition, InstantiableVariant, PlacementKind};
pub use document::{DocumentState, SourceRecord, TargetDocument, Template, UnitSystem};
pub use outcome::{MergeOutcome, RunResult};
pub use placement::{ElementId, PlacementCategory, PlacementInstance, Xyz};
