// src/batch/mapper.rs

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::types::SourcePath;
use crate::watch::WatchRule;

/// Source paths partitioned by the output directory they compile into.
///
/// Directories iterate in sorted order; paths keep the order they were
/// assigned in. Directories never hold an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputGroup {
    dirs: BTreeMap<String, Vec<SourcePath>>,
}

impl OutputGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, directory: impl Into<String>, path: impl Into<SourcePath>) {
        self.dirs
            .entry(directory.into())
            .or_default()
            .push(path.into());
    }

    pub fn get(&self, directory: &str) -> Option<&[SourcePath]> {
        self.dirs.get(directory).map(Vec::as_slice)
    }

    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.dirs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SourcePath])> {
        self.dirs.iter().map(|(d, p)| (d.as_str(), p.as_slice()))
    }

    /// Number of directories.
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Whether `path` was assigned to any directory.
    pub fn contains(&self, path: &str) -> bool {
        self.dirs.values().any(|paths| paths.iter().any(|p| p == path))
    }

    /// Total number of source paths across all directories.
    pub fn file_count(&self) -> usize {
        self.dirs.values().map(Vec::len).sum()
    }
}

/// Assign each path to the output directory its generated file belongs in.
///
/// With `shallow` set every path lands in `output_root`. Otherwise the first
/// rule (in rule order) whose pattern matches decides: if its first capture
/// group matched something non-empty, the directory part of the capture is
/// appended to the output root, so `templates/(.+)` mapping
/// `templates/a/b.handlebars` yields `<root>/a`. A rule may carry its own
/// output root, which then replaces `output_root`.
///
/// Paths matching no rule are dropped.
pub fn group<S: AsRef<str>>(
    rules: &[WatchRule],
    paths: &[S],
    output_root: &str,
    shallow: bool,
) -> OutputGroup {
    let mut grouped = OutputGroup::new();

    if shallow {
        for path in paths {
            let path: &str = path.as_ref();
            grouped.insert(output_root, path);
        }
        return grouped;
    }

    for path in paths {
        let path: &str = path.as_ref();
        let Some((rule, captures)) = rules
            .iter()
            .find_map(|rule| rule.pattern().captures(path).map(|c| (rule, c)))
        else {
            warn!(path, "no watch rule matches; dropping");
            continue;
        };

        let root = rule.output().unwrap_or(output_root);
        let target = match captures.get(1).map(|m| m.as_str()) {
            Some(captured) if !captured.is_empty() => nested_dir(root, captured),
            _ => root.to_string(),
        };

        debug!(path, rule = %rule.pattern(), target = %target, "mapped template");
        grouped.insert(target, path);
    }

    grouped
}

/// `root` joined with the directory part of `captured`, without a trailing `/.`.
fn nested_dir(root: &str, captured: &str) -> String {
    let joined = join(root, dirname(captured));
    let mut collapsed = joined.as_str();
    while let Some(stripped) = collapsed.strip_suffix("/.") {
        collapsed = stripped;
    }
    collapsed.to_string()
}

/// Directory component of a slash-separated path; `"."` when there is none.
pub fn dirname(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => "/",
        Some(idx) => trimmed[..idx].trim_end_matches('/'),
        None => ".",
    }
}

/// Join two slash-separated path fragments with exactly one separator.
pub fn join(base: &str, tail: &str) -> String {
    if base.is_empty() {
        return tail.to_string();
    }
    let tail = tail.trim_start_matches('/');
    if tail.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), tail)
}
