// src/watch/path_utils.rs

//! Utility functions for path handling in the watcher.

use std::path::Path;

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// - First we try a direct `strip_prefix(root)`.
/// - If that fails (e.g. due to symlinks or different absolute prefixes),
///   we canonicalize both paths and try again. Removed files cannot be
///   canonicalized, so for those we canonicalize the parent instead.
///
/// Returns `None` if the path cannot be reasonably related to `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    // Fast path: event path already starts with our root.
    if let Ok(rel) = path.strip_prefix(root) {
        return Some(to_slash(rel));
    }

    let root_canon = root.canonicalize().ok()?;

    if let Ok(path_canon) = path.canonicalize() {
        if let Ok(rel) = path_canon.strip_prefix(&root_canon) {
            return Some(to_slash(rel));
        }
    }

    let (parent, name) = (path.parent()?, path.file_name()?);
    let parent_canon = parent.canonicalize().ok()?;
    let rel = parent_canon.strip_prefix(&root_canon).ok()?;
    Some(to_slash(&rel.join(name)))
}

fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
