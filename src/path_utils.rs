//! Cross-platform path display helpers

use std::path::Path;

/// Convert a path to a string with forward slashes
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Display `path` relative to `base` when it lies inside it.
///
/// Falls back to the full path (forward slashes) for paths outside `base`.
pub fn display_relative(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(relative) if !relative.as_os_str().is_empty() => to_forward_slashes(relative),
        _ => to_forward_slashes(path),
    }
}
