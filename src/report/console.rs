// src/report/console.rs

use tracing::{error, info};

use super::Reporter;
use crate::types::NotifyKind;

/// Prints user-facing lines on stdout and mirrors them into the log.
///
/// Logs go to stderr (see [`crate::logging`]), so stdout only carries the
/// `[tmplwatch] ...` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        println!("[tmplwatch] {message}");
        info!("{message}");
    }

    fn success(&self, message: &str) {
        println!("[tmplwatch] {message}");
        info!(outcome = "success", "{message}");
    }

    fn error(&self, message: &str) {
        println!("[tmplwatch] ERROR {message}");
        error!("{message}");
    }

    fn notify(&self, message: &str, title: &str, kind: NotifyKind) {
        // Failures were already printed one by one through `error`.
        match kind {
            NotifyKind::Success => info!(%title, "{message}"),
            NotifyKind::Failed => error!(%title, "{message}"),
        }
    }
}
