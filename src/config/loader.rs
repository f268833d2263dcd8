//! Layered configuration loading
//!
//! Priority order (later sources override earlier ones):
//! 1. Built-in defaults
//! 2. Global `config.yaml` from `~/.config/family-loader/` (if exists)
//! 3. `family-loader.yaml` in the working directory, or an explicit `--config` file
//! 4. CLI flags (applied by the caller)

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::{ConfigOverrides, PipelineConfig};
use crate::error::{Result, config_read_failed};

/// Config file looked up in the working directory
pub const WORKSPACE_CONFIG_FILE: &str = "family-loader.yaml";

/// Config file looked up in the global config directory
pub const GLOBAL_CONFIG_FILE: &str = "config.yaml";

/// Overrides the global config directory (used by tests and locked-down hosts)
pub const CONFIG_DIR_ENV: &str = "FAMILY_LOADER_CONFIG_DIR";

/// Configuration loader for one working directory
pub struct ConfigLoader {
    working_dir: PathBuf,
    explicit: Option<PathBuf>,
}

impl ConfigLoader {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            explicit: None,
        }
    }

    /// Use `path` instead of the working directory config file. It must exist.
    pub fn with_explicit(mut self, path: Option<PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    /// Load and validate the effective configuration
    pub fn load(&self) -> Result<PipelineConfig> {
        let mut config = PipelineConfig::default();

        if let Some(global) = self.load_global()? {
            config.apply(global);
        }

        if let Some(workspace) = self.load_workspace()? {
            config.apply(workspace);
        }

        config.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Directory holding the global config file, if one can be determined
    pub fn global_config_dir() -> Option<PathBuf> {
        if let Some(dir) = env::var_os(CONFIG_DIR_ENV) {
            return Some(PathBuf::from(dir));
        }
        dirs::config_dir().map(|dir| dir.join("family-loader"))
    }

    fn load_global(&self) -> Result<Option<ConfigOverrides>> {
        // Headless hosts may have no home directory; that only means no global layer
        let Some(dir) = Self::global_config_dir() else {
            return Ok(None);
        };

        let path = dir.join(GLOBAL_CONFIG_FILE);
        if !path.is_file() {
            return Ok(None);
        }

        Self::read_layer(&path).map(Some)
    }

    fn load_workspace(&self) -> Result<Option<ConfigOverrides>> {
        if let Some(explicit) = &self.explicit {
            return Self::read_layer(explicit).map(Some);
        }

        let path = self.working_dir.join(WORKSPACE_CONFIG_FILE);
        if !path.is_file() {
            return Ok(None);
        }

        Self::read_layer(&path).map(Some)
    }

    fn read_layer(path: &Path) -> Result<ConfigOverrides> {
        let content = fs::read_to_string(path)
            .map_err(|e| config_read_failed(path.display().to_string(), e.to_string()))?;
        ConfigOverrides::from_yaml(&content, &path.display().to_string())
    }
}
