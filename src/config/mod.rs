//! Pipeline configuration
//!
//! This module handles:
//! - The effective [`PipelineConfig`] a run uses
//! - Partial [`ConfigOverrides`] read from `family-loader.yaml` files or CLI flags
//! - Layered loading via [`ConfigLoader`]
//!
//! ## Configuration file
//!
//! ```yaml
//! resources_dir: Families
//! pattern: "**/*.pkg"
//! output_file: outputFile.json
//! unit_system: metric
//! on_duplicate: overwrite
//! first_only: false
//! ```

pub mod loader;

pub use loader::{CONFIG_DIR_ENV, ConfigLoader, GLOBAL_CONFIG_FILE, WORKSPACE_CONFIG_FILE};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::UnitSystem;
use crate::error::{Result, config_invalid, config_parse_failed};

/// Default glob for resource packages
pub const DEFAULT_PATTERN: &str = "**/*.pkg";

/// Default artifact file name; the invoking automation activity expects this exact name
pub const DEFAULT_OUTPUT_FILE: &str = "outputFile.json";

/// What to do when the target already holds a definition with the same name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Update variant parameters, keep existing instances, append new variants
    #[default]
    Overwrite,
    /// Fail the import, leaving the existing definition untouched
    Reject,
}

/// Effective configuration for one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineConfig {
    /// Directory searched for packages, relative to the working directory
    pub resources_dir: PathBuf,
    /// Glob matched against paths relative to `resources_dir`
    pub pattern: String,
    /// Artifact path, relative to the working directory
    pub output_file: PathBuf,
    pub unit_system: UnitSystem,
    pub on_duplicate: DuplicatePolicy,
    /// Process only the first discovered package
    pub first_only: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            resources_dir: PathBuf::from("."),
            pattern: DEFAULT_PATTERN.to_string(),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            unit_system: UnitSystem::Metric,
            on_duplicate: DuplicatePolicy::Overwrite,
            first_only: false,
        }
    }
}

impl PipelineConfig {
    /// Apply a layer of overrides; set fields win
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(resources_dir) = overrides.resources_dir {
            self.resources_dir = resources_dir;
        }
        if let Some(pattern) = overrides.pattern {
            self.pattern = pattern;
        }
        if let Some(output_file) = overrides.output_file {
            self.output_file = output_file;
        }
        if let Some(unit_system) = overrides.unit_system {
            self.unit_system = unit_system;
        }
        if let Some(on_duplicate) = overrides.on_duplicate {
            self.on_duplicate = on_duplicate;
        }
        if let Some(first_only) = overrides.first_only {
            self.first_only = first_only;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.pattern.trim().is_empty() {
            return Err(config_invalid("pattern cannot be empty"));
        }
        if self.output_file.as_os_str().is_empty() {
            return Err(config_invalid("output_file cannot be empty"));
        }
        if wax::Glob::new(&self.pattern).is_err() {
            return Err(config_invalid(format!(
                "pattern '{}' is not a valid glob",
                self.pattern
            )));
        }
        Ok(())
    }
}

/// One configuration layer; unset fields leave earlier layers alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_system: Option<UnitSystem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_duplicate: Option<DuplicatePolicy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_only: Option<bool>,
}

impl ConfigOverrides {
    /// Parse a configuration layer from YAML
    ///
    /// An empty document is an empty layer.
    pub fn from_yaml(yaml: &str, path: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|e| config_parse_failed(path, e.to_string()))
    }
}
