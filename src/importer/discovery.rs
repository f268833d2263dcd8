//! Resource discovery for working directories
//!
//! This module handles:
//! - Walking the resources directory recursively
//! - Matching candidate files against the configured glob pattern
//! - Returning candidates in a stable, file-name-sorted order

use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::error::{Result, config_invalid};
use crate::path_utils::to_forward_slashes;

/// A discovered resource package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredResource {
    /// Path relative to the discovery root (e.g., "Furniture/desk.pkg")
    pub relative_path: PathBuf,

    /// Absolute path to the file
    pub absolute_path: PathBuf,
}

/// Enumerates candidate resource files under a root directory
pub trait ResourceDiscovery {
    /// Candidates in processing order. A missing root yields no candidates.
    fn discover(&self, root: &Path) -> Result<Vec<DiscoveredResource>>;

    /// Human-readable description of what is searched for
    fn describe(&self) -> String;
}

/// Discovery by glob pattern over a recursive directory walk
#[derive(Debug, Clone)]
pub struct GlobDiscovery {
    pattern: String,
}

impl GlobDiscovery {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl ResourceDiscovery for GlobDiscovery {
    fn discover(&self, root: &Path) -> Result<Vec<DiscoveredResource>> {
        let glob = Glob::new(&self.pattern)
            .map_err(|e| config_invalid(format!("invalid pattern '{}': {e}", self.pattern)))?;

        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let resources = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| {
                entry
                    .map_err(|err| {
                        tracing::warn!(
                            root = %root.display(),
                            error = %err,
                            "skipping unreadable entry"
                        );
                    })
                    .ok()
            })
            .filter(|e| e.file_type().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(root).ok()?.to_path_buf();
                let normalized = to_forward_slashes(&relative_path);
                glob.matched(&CandidatePath::from(normalized.as_str()))
                    .is_some()
                    .then(|| DiscoveredResource {
                        relative_path,
                        absolute_path: entry.path().to_path_buf(),
                    })
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            root = %root.display(),
            pattern = %self.pattern,
            count = resources.len(),
            "resources discovered"
        );
        Ok(resources)
    }

    fn describe(&self) -> String {
        self.pattern.clone()
    }
}
