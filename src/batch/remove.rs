// src/batch/remove.rs

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use super::{mapper, BatchSettings};
use crate::fs::FileSystem;
use crate::watch::WatchRule;

/// Delete the generated files belonging to removed templates.
///
/// Paths go through [`mapper::group`] exactly as in a compile run, so the
/// file deleted is the one compiling the template would have written.
/// Outputs that do not exist are skipped silently. Returns the deleted
/// files in the order they were removed.
pub fn remove_batch<S: AsRef<str>>(
    fs: &dyn FileSystem,
    rules: &[WatchRule],
    paths: &[S],
    output_root: &str,
    shallow: bool,
    settings: &BatchSettings,
) -> Result<Vec<String>> {
    let grouped = mapper::group(rules, paths, output_root, shallow);
    let mut removed = Vec::new();

    for (directory, files) in grouped.iter() {
        for file in files.iter().map(String::as_str) {
            let output = settings.output_path(directory, file);
            if removed.contains(&output) || !fs.exists(Path::new(&output)) {
                debug!(file, output = %output, "no generated file to remove");
                continue;
            }
            fs.remove_file(Path::new(&output))?;
            debug!(file, output = %output, "removed generated file");
            removed.push(output);
        }
    }

    Ok(removed)
}
