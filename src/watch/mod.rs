// src/watch/mod.rs

//! The watching host around the batch pipeline.
//!
//! This module is responsible for:
//! - Compiling `[[watch]]` rules (and the implicit input rule) into regexes.
//! - Finding every template below the root for full runs.
//! - Wiring up a cross-platform filesystem watcher (`notify`) whose events
//!   become compile and removal runs.

pub mod discover;
pub mod event_handler;
pub mod path_utils;
pub mod rules;
pub mod watcher;

pub use event_handler::{classify_event, process_change_set, ChangeSet};
pub use rules::{build_rules_from_config, input_rule, match_files, WatchRule};
pub use watcher::{spawn_watcher, WatcherHandle};
