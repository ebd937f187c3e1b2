// src/batch/compile.rs

use std::path::Path;

use anyhow::Result;
use tracing::{debug, info};

use super::{BatchSettings, OutputGroup};
use crate::compiler::TemplateCompiler;
use crate::fs::FileSystem;
use crate::report::Reporter;
use crate::types::SourcePath;

/// Outcome of compiling a single template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileResult {
    /// The generated file that was written.
    Written(String),
    /// The template was rejected (compiler error or undecodable source);
    /// nothing was written.
    Failed { source: SourcePath, message: String },
}

/// Aggregated outcome of a compile batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileReport {
    /// Generated files written during the batch, without duplicates.
    pub written: Vec<String>,
    /// One `"<file>: <failure>"` line per template that failed.
    pub errors: Vec<String>,
}

impl CompileReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn record(&mut self, result: CompileResult) {
        match result {
            CompileResult::Written(path) => {
                if !self.written.contains(&path) {
                    self.written.push(path);
                }
            }
            CompileResult::Failed { source, message } => {
                let line = format!("{source}: {message}");
                if !self.errors.contains(&line) {
                    self.errors.push(line);
                }
            }
        }
    }
}

/// Compile every template in `group` into its output directory.
///
/// Each directory is created (if missing) before anything is written to it.
/// A compiler failure is confined to its own file: it is reported through
/// `reporter.error`, collected in [`CompileReport::errors`], and the batch
/// moves on. A failing template writes nothing, so output from an earlier
/// successful run stays where it is.
///
/// A source that is not valid UTF-8 fails like a compiler error. Filesystem
/// errors (creating a directory, reading a source, writing an output) abort
/// the batch.
pub fn compile_batch(
    fs: &dyn FileSystem,
    compiler: &dyn TemplateCompiler,
    reporter: &dyn Reporter,
    group: &OutputGroup,
    settings: &BatchSettings,
) -> Result<CompileReport> {
    let mut report = CompileReport::default();

    for (directory, files) in group.iter() {
        ensure_dir(fs, directory)?;

        for file in files {
            let result = compile_file(fs, compiler, directory, file, settings)?;
            if let CompileResult::Failed { source, message } = &result {
                reporter.error(&format!("{source}: {message}"));
            }
            report.record(result);
        }
    }

    info!(
        written = report.written.len(),
        failed = report.errors.len(),
        "compile batch finished"
    );
    Ok(report)
}

/// Compile one template and write its output into `directory`.
pub fn compile_file(
    fs: &dyn FileSystem,
    compiler: &dyn TemplateCompiler,
    directory: &str,
    file: &str,
    settings: &BatchSettings,
) -> Result<CompileResult> {
    let name = settings.logical_name(file);
    let bytes = fs.read(Path::new(file))?;
    let source = match String::from_utf8(bytes) {
        Ok(source) => source,
        Err(err) => {
            debug!(file, error = %err, "template is not valid UTF-8");
            return Ok(CompileResult::Failed {
                source: file.to_string(),
                message: format!("invalid UTF-8: {}", err.utf8_error()),
            });
        }
    };

    let content = match compiler.compile(name, &source, &settings.compile) {
        Ok(content) => content,
        Err(failure) => {
            debug!(file, error = %failure, "template failed to compile");
            return Ok(CompileResult::Failed {
                source: file.to_string(),
                message: failure.to_string(),
            });
        }
    };

    let output = settings.output_path(directory, file);
    fs.write(Path::new(&output), content.as_bytes())?;
    debug!(file, output = %output, "wrote compiled template");

    Ok(CompileResult::Written(output))
}

fn ensure_dir(fs: &dyn FileSystem, directory: &str) -> Result<()> {
    let path = Path::new(directory);
    if !fs.is_dir(path) {
        debug!(directory, "creating output directory");
        fs.create_dir_all(path)?;
    }
    Ok(())
}
