//! Merge transaction errors

use super::LoaderError;

/// Creates an import failure (definition cannot attach to the target)
pub fn import_failed(definition: impl Into<String>, reason: impl Into<String>) -> LoaderError {
    LoaderError::ImportFailure {
        definition: definition.into(),
        reason: reason.into(),
    }
}

/// Creates an activation failure for a single variant
pub fn activation_failed(
    definition: impl Into<String>,
    variant: impl Into<String>,
    reason: impl Into<String>,
) -> LoaderError {
    LoaderError::ActivationFailure {
        definition: definition.into(),
        variant: variant.into(),
        reason: reason.into(),
    }
}

/// Creates a placement failure for a single variant
pub fn placement_failed(
    definition: impl Into<String>,
    variant: impl Into<String>,
    reason: impl Into<String>,
) -> LoaderError {
    LoaderError::PlacementFailure {
        definition: definition.into(),
        variant: variant.into(),
        reason: reason.into(),
    }
}
