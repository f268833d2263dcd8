//! File system errors

use super::LoaderError;

/// Creates a file read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> LoaderError {
    LoaderError::FileReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> LoaderError {
    LoaderError::IoError {
        message: message.into(),
    }
}
