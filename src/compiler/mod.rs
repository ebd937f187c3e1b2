// src/compiler/mod.rs

//! Template compiler capability.
//!
//! The batches never compile anything themselves; they hand a template's
//! logical name and source text to a [`TemplateCompiler`] and either write
//! the returned text or record the failure. [`HandlebarsJsCompiler`] is the
//! production implementation.

use std::fmt::Debug;

use thiserror::Error;

pub mod handlebars;

pub use self::handlebars::HandlebarsJsCompiler;

/// Options forwarded untouched to the compiler for every template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Emit the registration statement without the surrounding IIFE.
    pub bare: bool,
    /// Register into `Ember.TEMPLATES` instead of `Handlebars.templates`.
    pub emberjs: bool,
}

/// Why a single template failed to compile.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CompileFailure {
    pub message: String,
}

impl CompileFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Turns template source into generated output text.
pub trait TemplateCompiler: Send + Sync + Debug {
    fn compile(
        &self,
        name: &str,
        source: &str,
        options: &CompileOptions,
    ) -> Result<String, CompileFailure>;
}
