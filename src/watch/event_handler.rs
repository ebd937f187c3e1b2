// src/watch/event_handler.rs

//! Turning raw filesystem events into compile and removal runs.

use std::path::Path;

use notify::{Event, EventKind};
use tracing::{debug, warn};

use crate::engine::Runner;
use crate::fs::FileSystem;
use crate::watch::path_utils::relative_str;
use crate::watch::rules::match_files;

/// Paths touched by one drained burst of events, split by what happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub changed: Vec<String>,
    pub removed: Vec<String>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.removed.is_empty()
    }

    /// Record `rel_path`, moving it between lists if a later event in the
    /// same burst says otherwise.
    pub fn record(&mut self, rel_path: String, exists: bool) {
        self.changed.retain(|p| p != &rel_path);
        self.removed.retain(|p| p != &rel_path);
        if exists {
            self.changed.push(rel_path);
        } else {
            self.removed.push(rel_path);
        }
    }
}

/// Fold one notify event into `set`.
///
/// Access events are ignored. Every other path is classified by whether it
/// still exists, which also covers renames (old name gone, new name present).
pub fn classify_event(fs: &dyn FileSystem, root: &Path, event: &Event, set: &mut ChangeSet) {
    if matches!(event.kind, EventKind::Access(_)) {
        return;
    }

    for path in &event.paths {
        let Some(rel) = relative_str(root, path) else {
            warn!(
                "could not relativize path {:?} against root {:?}",
                path, root
            );
            continue;
        };
        if fs.is_dir(path) {
            continue;
        }
        let exists = fs.exists(path);
        debug!(?path, rel = %rel, exists, "normalized event path");
        set.record(rel, exists);
    }
}

/// Hand a change set to the runner: removals first, then compiles.
///
/// Only paths claimed by one of the runner's watch rules are passed on, so
/// an unrelated template never compiles into (or deletes from) the output
/// tree. A failing run is logged and does not stop the watcher; the next
/// change triggers a fresh run.
pub fn process_change_set(runner: &Runner, set: &ChangeSet) {
    let removed = match_files(runner.rules(), &set.removed);
    let changed = match_files(runner.rules(), &set.changed);
    debug!(
        removed = removed.len(),
        changed = changed.len(),
        ignored = set.removed.len() + set.changed.len() - removed.len() - changed.len(),
        "matched change set against watch rules"
    );

    if !removed.is_empty() {
        if let Err(err) = runner.run_on_removals(&removed) {
            warn!("removal run failed: {err:#}");
        }
    }

    if !changed.is_empty() {
        match runner.run_on_change(&changed) {
            Ok(written) if !written.is_empty() => {
                debug!(?written, "generated files changed");
            }
            Ok(_) => {}
            Err(err) => warn!("compile run failed: {err:#}"),
        }
    }
}
