// src/watch/watcher.rs

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, info, warn};

use crate::engine::Runner;
use crate::watch::event_handler::{classify_event, process_change_set, ChangeSet};

/// Handle for the filesystem watcher.
///
/// This exists mainly so the underlying `RecommendedWatcher` is kept alive for
/// as long as needed. Dropping this handle will stop file watching.
pub struct WatcherHandle {
    _inner: RecommendedWatcher,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

/// Spawn a filesystem watcher that observes `root` recursively and feeds
/// changed and removed templates to `runner`.
///
/// Events that arrive together are drained into one [`ChangeSet`] so a save
/// touching several templates becomes a single run. Runs execute on the
/// blocking pool one after another; the runner is never re-entered.
pub fn spawn_watcher(root: impl Into<PathBuf>, runner: Arc<Runner>) -> Result<WatcherHandle> {
    let root = root.into();
    // Canonicalize once so we have a stable base path.
    let root = root.canonicalize().unwrap_or_else(|_| root.clone());

    // Channel from the blocking notify callback into the async world.
    let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel::<Event>();

    // Closure called synchronously by notify whenever an event arrives.
    let mut watcher = RecommendedWatcher::new(
        move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if let Err(err) = event_tx.send(event) {
                    // We can't log via tracing here easily, so fallback to stderr.
                    eprintln!("tmplwatch: failed to forward notify event: {err}");
                }
            }
            Err(err) => {
                eprintln!("tmplwatch: file watch error: {err}");
            }
        },
        Config::default(),
    )?;

    watcher.watch(&root, RecursiveMode::Recursive)?;

    info!("file watcher started on {:?}", root);

    tokio::spawn(async move {
        while let Some(first) = event_rx.recv().await {
            let mut set = ChangeSet::default();
            classify_event(runner.fs().as_ref(), &root, &first, &mut set);
            while let Ok(event) = event_rx.try_recv() {
                classify_event(runner.fs().as_ref(), &root, &event, &mut set);
            }

            if set.is_empty() {
                continue;
            }
            debug!(?set, "processing change set");

            let runner = Arc::clone(&runner);
            if let Err(err) =
                tokio::task::spawn_blocking(move || process_change_set(&runner, &set)).await
            {
                warn!("change set processing panicked: {err}");
            }
        }
        debug!("watcher event loop finished");
    });

    Ok(WatcherHandle { _inner: watcher })
}
