//! Error types and handling for family-loader
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`resource`]: Opening resource packages and extracting definitions
//! - [`merge`]: Failures inside a merge transaction
//! - [`run`]: Run-level (fatal) failures
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors

pub mod config;
pub mod fs;
pub mod merge;
pub mod resource;
pub mod run;

pub use config::{
    invalid as config_invalid, parse_failed as config_parse_failed,
    read_failed as config_read_failed,
};
pub use fs::{io_error, read_failed as file_read_failed};
pub use merge::{activation_failed, import_failed, placement_failed};
pub use resource::{extraction_failed, open_failed};
pub use run::{all_resources_failed, no_resources_found, persist_failed, precondition_failed};

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for family-loader operations
#[derive(Error, Diagnostic, Debug)]
pub enum LoaderError {
    // Run-level errors
    #[error("Precondition failed: {message}")]
    #[diagnostic(
        code(family_loader::run::precondition),
        help("The automation host must provide a document host and an existing working directory")
    )]
    PreconditionFailure { message: String },

    #[error("No resource packages found under {path} matching '{pattern}'")]
    #[diagnostic(
        code(family_loader::run::no_resources),
        help("Place at least one package file in the working directory or adjust `pattern`")
    )]
    NoResourcesFound { path: String, pattern: String },

    #[error("Cannot load any of the {attempted} resource packages into the target document")]
    #[diagnostic(code(family_loader::run::all_failed))]
    AllResourcesFailed { attempted: usize },

    #[error("Failed to save artifact to {path}: {reason}")]
    #[diagnostic(
        code(family_loader::run::persist_failed),
        help("Check that the output location is writable and not locked by another process")
    )]
    PersistFailure { path: String, reason: String },

    // Resource errors
    #[error("Failed to open resource package {path}: {reason}")]
    #[diagnostic(code(family_loader::resource::open_failed))]
    OpenFailure { path: String, reason: String },

    #[error("No usable content definition in {path}: {reason}")]
    #[diagnostic(code(family_loader::resource::extraction_failed))]
    ExtractionFailure { path: String, reason: String },

    // Merge errors
    #[error("Failed to import definition '{definition}': {reason}")]
    #[diagnostic(code(family_loader::merge::import_failed))]
    ImportFailure { definition: String, reason: String },

    #[error("Failed to activate variant '{variant}' of '{definition}': {reason}")]
    #[diagnostic(code(family_loader::merge::activation_failed))]
    ActivationFailure {
        definition: String,
        variant: String,
        reason: String,
    },

    #[error("Failed to place variant '{variant}' of '{definition}': {reason}")]
    #[diagnostic(code(family_loader::merge::placement_failed))]
    PlacementFailure {
        definition: String,
        variant: String,
        reason: String,
    },

    // Configuration errors
    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(family_loader::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file {path}: {reason}")]
    #[diagnostic(code(family_loader::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(family_loader::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(family_loader::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(family_loader::fs::io_error))]
    IoError { message: String },
}

impl LoaderError {
    /// Whether this error only skips the current resource instead of ending the run
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::OpenFailure { .. }
                | Self::ExtractionFailure { .. }
                | Self::ImportFailure { .. }
                | Self::ActivationFailure { .. }
                | Self::PlacementFailure { .. }
        )
    }

    /// Short taxonomy name used in trace output and outcome summaries
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PreconditionFailure { .. } => "PreconditionFailure",
            Self::NoResourcesFound { .. } => "NoResourcesFound",
            Self::AllResourcesFailed { .. } => "AllResourcesFailed",
            Self::PersistFailure { .. } => "PersistFailure",
            Self::OpenFailure { .. } => "OpenFailure",
            Self::ExtractionFailure { .. } => "ExtractionFailure",
            Self::ImportFailure { .. } => "ImportFailure",
            Self::ActivationFailure { .. } => "ActivationFailure",
            Self::PlacementFailure { .. } => "PlacementFailure",
            Self::ConfigReadFailed { .. }
            | Self::ConfigParseFailed { .. }
            | Self::ConfigInvalid { .. } => "ConfigFailure",
            Self::FileReadFailed { .. } | Self::IoError { .. } => "IoFailure",
        }
    }
}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for LoaderError {
    fn from(err: serde_yaml::Error) -> Self {
        LoaderError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for LoaderError {
    fn from(err: serde_json::Error) -> Self {
        LoaderError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, LoaderError>;
