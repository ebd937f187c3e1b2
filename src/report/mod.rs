// src/report/mod.rs

//! Notification sink for run results.
//!
//! Batches and the runner never print directly; they call into an injected
//! [`Reporter`]. Production uses [`ConsoleReporter`], tests use
//! [`NullReporter`] or a recording implementation.

use crate::types::NotifyKind;

pub mod console;

pub use console::ConsoleReporter;

/// Title attached to every desktop-style notification.
pub const NOTIFY_TITLE: &str = "Template results";

pub trait Reporter: Send + Sync {
    /// Progress line, e.g. the "Compile ..." notice at the start of a run.
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    /// A single failure, reported as soon as it happens.
    fn error(&self, message: &str);
    /// End-of-run notification summarising the outcome.
    fn notify(&self, message: &str, title: &str, kind: NotifyKind);
}

/// Reporter that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn info(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
    fn notify(&self, _message: &str, _title: &str, _kind: NotifyKind) {}
}
