// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::Path;

/// Render a path as a string with forward slashes.
pub fn normalized_str(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Whether `path` lies at or below `root`.
///
/// A direct `strip_prefix` is tried first. If that fails (symlinks, or the
/// `/private/var` vs `/var` split on macOS) both sides are canonicalized and
/// compared again. A path that no longer exists (e.g. just deleted) can only
/// match through the direct check or through its parent directory.
pub fn is_within(root: &Path, path: &Path) -> bool {
    if path.starts_with(root) {
        return true;
    }

    let Ok(root_canon) = root.canonicalize() else {
        return false;
    };

    if let Ok(path_canon) = path.canonicalize() {
        return path_canon.starts_with(&root_canon);
    }

    match (path.parent(), path.file_name()) {
        (Some(parent), Some(_)) => parent
            .canonicalize()
            .map(|p| p.starts_with(&root_canon))
            .unwrap_or(false),
        _ => false,
    }
}
