// src/batch/filter.rs

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::fs::FileSystem;
use crate::types::{Extensions, SourcePath};

/// Reduce a raw list of candidate paths to the templates a run should touch.
///
/// - duplicates are dropped, keeping the first occurrence;
/// - paths not ending in the source extension are dropped;
/// - unless `allow_missing` is set, paths that do not exist are dropped.
///
/// Never fails. Removal runs pass `allow_missing = true` since the files they
/// are told about are already gone.
pub fn clean<S: AsRef<str>>(
    fs: &dyn FileSystem,
    paths: &[S],
    extensions: &Extensions,
    allow_missing: bool,
) -> Vec<SourcePath> {
    let mut seen = HashSet::new();
    let mut cleaned = Vec::with_capacity(paths.len());

    for path in paths {
        let path: &str = path.as_ref();
        if !seen.insert(path) {
            continue;
        }
        if !extensions.is_source(path) {
            debug!(path, "ignoring non-template path");
            continue;
        }
        if !allow_missing && !fs.exists(Path::new(path)) {
            debug!(path, "ignoring missing template");
            continue;
        }
        cleaned.push(path.to_string());
    }

    cleaned
}
