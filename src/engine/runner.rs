// src/engine/runner.rs

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::batch::{self, BatchSettings, CompileReport};
use crate::compiler::TemplateCompiler;
use crate::config::ConfigFile;
use crate::fs::FileSystem;
use crate::report::{Reporter, NOTIFY_TITLE};
use crate::types::NotifyKind;
use crate::watch::discover::collect_templates;
use crate::watch::rules::{build_rules_from_config, match_files};
use crate::watch::WatchRule;

use super::RunOptions;

/// Drives compile and removal runs for one set of watch rules.
///
/// Every run is independent: nothing is carried over between calls. The
/// runner assumes it is not re-entered concurrently on the same output tree.
pub struct Runner {
    fs: Arc<dyn FileSystem>,
    compiler: Arc<dyn TemplateCompiler>,
    reporter: Arc<dyn Reporter>,
    rules: Vec<WatchRule>,
    settings: BatchSettings,
    options: RunOptions,
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("rules", &self.rules)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Runner {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        compiler: Arc<dyn TemplateCompiler>,
        reporter: Arc<dyn Reporter>,
        rules: Vec<WatchRule>,
        settings: BatchSettings,
        options: RunOptions,
    ) -> Self {
        Self {
            fs,
            compiler,
            reporter,
            rules,
            settings,
            options,
        }
    }

    /// Build a runner from a validated config.
    pub fn from_config(
        cfg: &ConfigFile,
        fs: Arc<dyn FileSystem>,
        compiler: Arc<dyn TemplateCompiler>,
        reporter: Arc<dyn Reporter>,
    ) -> crate::errors::Result<Self> {
        let rules = build_rules_from_config(cfg)?;
        Ok(Self::new(
            fs,
            compiler,
            reporter,
            rules,
            cfg.config.batch_settings(),
            RunOptions::from_config(cfg),
        ))
    }

    pub fn rules(&self) -> &[WatchRule] {
        &self.rules
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    pub fn fs(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// Compile the given changed templates.
    ///
    /// Templates no rule claims are dropped; when none are left the run is
    /// silent.
    ///
    /// Returns the generated files written during this run, for the host to
    /// hand on to anything watching them. Compiler failures are reported, not
    /// returned; only filesystem errors make this fail.
    pub fn run_on_change<S: AsRef<str>>(&self, paths: &[S]) -> Result<Vec<String>> {
        let files = batch::clean(self.fs.as_ref(), paths, &self.settings.extensions, false);
        if files.is_empty() {
            debug!("no templates to compile");
            return Ok(Vec::new());
        }

        let grouped = batch::group(
            &self.rules,
            &files,
            &self.options.output,
            self.options.shallow,
        );
        if grouped.is_empty() {
            debug!("no watch rule claims the changed templates");
            return Ok(Vec::new());
        }

        let scheduled: Vec<String> = files
            .into_iter()
            .filter(|file| grouped.contains(file))
            .collect();
        self.notify_start(&scheduled);

        let report = batch::compile_batch(
            self.fs.as_ref(),
            self.compiler.as_ref(),
            self.reporter.as_ref(),
            &grouped,
            &self.settings,
        )?;

        self.notify_result(&report);
        Ok(report.written)
    }

    /// Delete the generated files of removed templates.
    ///
    /// Returns the files actually deleted; an empty list means nothing was
    /// reported.
    pub fn run_on_removals<S: AsRef<str>>(&self, paths: &[S]) -> Result<Vec<String>> {
        let files = batch::clean(self.fs.as_ref(), paths, &self.settings.extensions, true);
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let removed = batch::remove_batch(
            self.fs.as_ref(),
            &self.rules,
            &files,
            &self.options.output,
            self.options.shallow,
            &self.settings,
        )?;

        if !removed.is_empty() {
            let message = format!("Removed {}", removed.join(", "));
            self.reporter.success(&message);
            self.reporter
                .notify(&message, NOTIFY_TITLE, NotifyKind::Success);
        }
        info!(removed = removed.len(), "removal run finished");
        Ok(removed)
    }

    /// Compile every template below the root that some rule claims.
    pub fn run_all(&self) -> Result<Vec<String>> {
        let templates = collect_templates(
            self.fs.as_ref(),
            &self.options.root,
            &self.settings.extensions,
        )?;
        let claimed = match_files(&self.rules, &templates);
        info!(found = templates.len(), claimed = claimed.len(), "full compile");
        self.run_on_change(&claimed)
    }

    fn notify_start(&self, files: &[String]) {
        let message = self
            .options
            .message
            .clone()
            .unwrap_or_else(|| format!("Compile {}", files.join(", ")));
        self.reporter.info(&message);
    }

    fn notify_result(&self, report: &CompileReport) {
        if report.has_errors() {
            self.reporter
                .notify(&report.errors.join("\n"), NOTIFY_TITLE, NotifyKind::Failed);
        } else if !self.options.hide_success {
            let message = format!("Successfully generated {}", report.written.join(", "));
            self.reporter.success(&message);
            self.reporter
                .notify(&message, NOTIFY_TITLE, NotifyKind::Success);
        }
    }
}
