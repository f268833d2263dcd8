//! Document host abstraction
//!
//! The host owns document creation and opening. The pipeline only ever talks
//! to it through [`DocumentHost`] and the [`HostDocument`] handles it returns:
//! - [`FsHost`]: reads resource packages from disk
//! - `MockHost` (tests only): scripted documents with open/close accounting

pub mod fs_host;
#[cfg(test)]
pub(crate) mod mock;
pub mod package;

pub use fs_host::FsHost;
pub use package::{PACKAGE_FORMAT_VERSION, PackageFile};

use std::path::Path;

use crate::domain::{ContentDefinition, TargetDocument, Template, UnitSystem};
use crate::error::Result;

/// An automation host able to create and open documents
pub trait DocumentHost {
    /// Template new target documents are created from
    fn template(&self, unit_system: UnitSystem) -> Template;

    /// Create an empty target document
    fn new_target_document(&self, template: &Template) -> Result<TargetDocument>;

    /// Open a resource package as a live document
    fn open_document(&self, path: &Path) -> Result<Box<dyn HostDocument>>;
}

/// A document opened by the host
pub trait HostDocument {
    fn title(&self) -> &str;

    /// Pull the content definition out of the document
    fn extract_definition(&self) -> Result<ContentDefinition>;

    /// Release the document without saving
    fn close(&mut self);
}

/// Built-in template for a unit system
pub fn default_template(unit_system: UnitSystem, format_version: u32) -> Template {
    let name = match unit_system {
        UnitSystem::Metric => "Metric Default",
        UnitSystem::Imperial => "Imperial Default",
    };
    Template {
        name: name.to_string(),
        unit_system,
        format_version,
    }
}
