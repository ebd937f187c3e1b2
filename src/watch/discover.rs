// src/watch/discover.rs

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{Glob, GlobMatcher};
use tracing::debug;

use crate::batch::mapper::join;
use crate::fs::FileSystem;
use crate::types::Extensions;

/// Glob matching every template below the root, e.g. `**/*.handlebars`.
fn template_glob(extensions: &Extensions) -> Result<GlobMatcher> {
    let pattern = format!("**/*.{}", extensions.source());
    let glob = Glob::new(&pattern).with_context(|| format!("invalid glob pattern: {pattern}"))?;
    Ok(glob.compile_matcher())
}

/// Collect every template file under `root`, sorted.
///
/// With root `.` the paths are relative (`templates/a.handlebars`); any
/// other root is kept as a prefix so the paths stay usable from the
/// current directory. Used for full runs (`--once`, `all_on_start`).
pub fn collect_templates(
    fs: &dyn FileSystem,
    root: &Path,
    extensions: &Extensions,
) -> Result<Vec<String>> {
    let matcher = template_glob(extensions)?;
    let mut files = Vec::new();
    let mut stack: Vec<PathBuf> = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        for path in fs.read_dir(&dir)? {
            if fs.is_dir(&path) {
                stack.push(path);
            } else if fs.is_file(&path) {
                if let Ok(rel) = path.strip_prefix(root) {
                    let rel_str = rel.to_string_lossy().replace('\\', "/");
                    if matcher.is_match(&rel_str) {
                        files.push(display_path(root, rel_str));
                    }
                }
            }
        }
    }

    files.sort();
    debug!(count = files.len(), ?root, "collected templates");
    Ok(files)
}

fn display_path(root: &Path, rel: String) -> String {
    if root == Path::new(".") || root.as_os_str().is_empty() {
        rel
    } else {
        join(&root.to_string_lossy().replace('\\', "/"), &rel)
    }
}
