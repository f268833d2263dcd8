//! Resource package errors
//!
//! Both kinds are recoverable: the pipeline skips the package and moves on.

use super::LoaderError;

/// Creates an open failure for a package that is not a valid document
pub fn open_failed(path: impl Into<String>, reason: impl Into<String>) -> LoaderError {
    LoaderError::OpenFailure {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an extraction failure for a document without a usable definition
pub fn extraction_failed(path: impl Into<String>, reason: impl Into<String>) -> LoaderError {
    LoaderError::ExtractionFailure {
        path: path.into(),
        reason: reason.into(),
    }
}
