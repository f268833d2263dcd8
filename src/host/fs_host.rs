//! Filesystem-backed document host

use std::fs;
use std::path::{Path, PathBuf};

use super::package::{PACKAGE_FORMAT_VERSION, PackageFile};
use super::{DocumentHost, HostDocument, default_template};
use crate::domain::{ContentDefinition, TargetDocument, Template, UnitSystem};
use crate::error::{Result, open_failed, precondition_failed};

/// Host that opens resource packages from disk
#[derive(Debug, Clone)]
pub struct FsHost {
    format_version: u32,
}

impl FsHost {
    pub fn new() -> Self {
        Self {
            format_version: PACKAGE_FORMAT_VERSION,
        }
    }
}

impl Default for FsHost {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentHost for FsHost {
    fn template(&self, unit_system: UnitSystem) -> Template {
        default_template(unit_system, self.format_version)
    }

    fn new_target_document(&self, template: &Template) -> Result<TargetDocument> {
        if template.format_version > self.format_version {
            return Err(precondition_failed(format!(
                "template '{}' requires format version {}, host supports {}",
                template.name, template.format_version, self.format_version
            )));
        }
        Ok(TargetDocument::from_template(template))
    }

    fn open_document(&self, path: &Path) -> Result<Box<dyn HostDocument>> {
        let shown = path.display().to_string();
        let content =
            fs::read_to_string(path).map_err(|e| open_failed(&shown, e.to_string()))?;
        let package = PackageFile::parse(&content, &shown)?;

        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| shown.clone());

        tracing::debug!(path = %shown, %title, "package document opened");
        Ok(Box::new(PackageDocument {
            path: path.to_path_buf(),
            title,
            package,
            open: true,
        }))
    }
}

/// A package opened as a live document
#[derive(Debug)]
struct PackageDocument {
    path: PathBuf,
    title: String,
    package: PackageFile,
    open: bool,
}

impl HostDocument for PackageDocument {
    fn title(&self) -> &str {
        &self.title
    }

    fn extract_definition(&self) -> Result<ContentDefinition> {
        self.package.to_definition(&self.path.display().to_string())
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            tracing::debug!(path = %self.path.display(), "package document closed");
        }
    }
}
