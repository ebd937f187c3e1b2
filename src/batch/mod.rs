// src/batch/mod.rs

//! The per-run batch pipeline.
//!
//! A compile run flows through:
//! 1. [`filter::clean`] drops duplicates, non-templates and (for compiles)
//!    paths that no longer exist;
//! 2. [`mapper::group`] assigns every path to the output directory its
//!    generated file belongs in;
//! 3. [`compile::compile_batch`] compiles and writes each file, isolating
//!    compiler failures per file.
//!
//! A removal run uses the same filter and mapper and ends in
//! [`remove::remove_batch`], so a generated file is always deleted from the
//! exact location it was written to.

use crate::compiler::CompileOptions;
use crate::types::Extensions;

pub mod compile;
pub mod filter;
pub mod mapper;
pub mod remove;

pub use compile::{compile_batch, CompileReport, CompileResult};
pub use filter::clean;
pub use mapper::{group, OutputGroup};
pub use remove::remove_batch;

/// Naming and compiler settings shared by the compile and remove batches.
#[derive(Debug, Clone, Default)]
pub struct BatchSettings {
    pub extensions: Extensions,
    /// Source root stripped from paths to build logical template names.
    pub input: Option<String>,
    pub compile: CompileOptions,
}

impl BatchSettings {
    /// Logical template name: `input` prefix and source extension removed.
    ///
    /// `app/templates/posts/show.handlebars` with input `app/templates`
    /// becomes `posts/show`.
    pub fn logical_name<'a>(&self, file: &'a str) -> &'a str {
        let relative = match self.input.as_deref() {
            Some(root) if !root.is_empty() => file
                .strip_prefix(root)
                .map(|rest| rest.strip_prefix('/').unwrap_or(rest))
                .unwrap_or(file),
            _ => file,
        };
        self.extensions.strip_source(relative)
    }

    /// Full path of the generated file for `file` inside `directory`.
    pub fn output_path(&self, directory: &str, file: &str) -> String {
        mapper::join(directory, &self.extensions.output_file_name(file))
    }
}
