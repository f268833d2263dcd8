//! Run-level errors
//!
//! These end the run with overall failure and no artifact.

use super::LoaderError;

/// Creates a precondition failure
pub fn precondition_failed(message: impl Into<String>) -> LoaderError {
    LoaderError::PreconditionFailure {
        message: message.into(),
    }
}

/// Creates a no-resources error for an empty discovery
pub fn no_resources_found(path: impl Into<String>, pattern: impl Into<String>) -> LoaderError {
    LoaderError::NoResourcesFound {
        path: path.into(),
        pattern: pattern.into(),
    }
}

/// Creates an aggregate failure after every resource was skipped
pub fn all_resources_failed(attempted: usize) -> LoaderError {
    LoaderError::AllResourcesFailed { attempted }
}

/// Creates a persist failure for the final save
pub fn persist_failed(path: impl Into<String>, reason: impl Into<String>) -> LoaderError {
    LoaderError::PersistFailure {
        path: path.into(),
        reason: reason.into(),
    }
}
