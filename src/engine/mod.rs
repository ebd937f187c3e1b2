// src/engine/mod.rs

//! Run orchestration for tmplwatch.
//!
//! A run takes a list of paths from the host and:
//! - cleans it,
//! - maps every template to its output directory,
//! - compiles (or removes) the batch,
//! - tells the [`crate::report::Reporter`] how it went.
//!
//! The [`Runner`] owns the capabilities a run needs (filesystem, compiler,
//! reporter) so the host only passes paths in.

use std::path::PathBuf;

use crate::config::ConfigFile;

pub mod runner;

pub use runner::Runner;

/// Per-run options taken from `[config]`.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Output root generated files are written under.
    pub output: String,
    /// Flatten every output into `output`.
    pub shallow: bool,
    /// Skip the success notification.
    pub hide_success: bool,
    /// Custom start notice.
    pub message: Option<String>,
    /// Directory full runs search for templates.
    pub root: PathBuf,
}

impl RunOptions {
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            shallow: false,
            hide_success: false,
            message: None,
            root: PathBuf::from("."),
        }
    }

    pub fn from_config(cfg: &ConfigFile) -> Self {
        Self {
            output: cfg.config.output.clone(),
            shallow: cfg.config.shallow,
            hide_success: cfg.config.hide_success,
            message: cfg.config.message.clone(),
            root: PathBuf::from("."),
        }
    }

    pub fn shallow(mut self, shallow: bool) -> Self {
        self.shallow = shallow;
        self
    }

    pub fn hide_success(mut self, hide: bool) -> Self {
        self.hide_success = hide;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }
}
