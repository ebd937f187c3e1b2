// src/lib.rs

pub mod batch;
pub mod cli;
pub mod compiler;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fs;
pub mod logging;
pub mod report;
pub mod types;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::compiler::HandlebarsJsCompiler;
use crate::config::load_and_validate;
use crate::config::model::ConfigFile;
use crate::engine::Runner;
use crate::fs::RealFileSystem;
use crate::report::ConsoleReporter;
use crate::watch::WatchRule;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the runner with the real filesystem, compiler and console reporter
/// - a full compile (`--once` or `all_on_start`)
/// - the file watcher and Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)
        .with_context(|| format!("loading config {:?}", config_path))?;

    // Rules and output paths are relative to the directory holding the config.
    let root_dir = config_root_dir(&config_path);
    std::env::set_current_dir(&root_dir)
        .with_context(|| format!("entering project root {:?}", root_dir))?;
    debug!(root = ?root_dir, "working from project root");

    let runner = Arc::new(Runner::from_config(
        &cfg,
        Arc::new(RealFileSystem),
        Arc::new(HandlebarsJsCompiler::new()),
        Arc::new(ConsoleReporter),
    )?);

    if args.dry_run {
        print_dry_run(&cfg, runner.rules());
        return Ok(());
    }

    if args.once || cfg.config.all_on_start {
        let full = Arc::clone(&runner);
        let written = tokio::task::spawn_blocking(move || full.run_all()).await??;
        info!(written = written.len(), "full compile finished");
        if args.once {
            return Ok(());
        }
    }

    let _watcher_handle = crate::watch::spawn_watcher(".", Arc::clone(&runner))?;

    tokio::signal::ctrl_c()
        .await
        .context("listening for Ctrl+C")?;
    info!("shutting down");
    Ok(())
}

/// Figure out the project root.
///
/// - If the config path has a non-empty parent (e.g. "site/Tmplwatch.toml"),
///   we use that directory.
/// - If it's just a bare filename like "Tmplwatch.toml" (parent = ""),
///   we fall back to the current working directory "."
fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Simple dry-run output: print options and the effective rule order.
fn print_dry_run(cfg: &ConfigFile, rules: &[WatchRule]) {
    let c = &cfg.config;
    println!("tmplwatch dry-run");
    println!("  output = {}", c.output);
    if let Some(ref input) = c.input {
        println!("  input = {input}");
    }
    println!("  shallow = {}", c.shallow);
    println!("  hide_success = {}", c.hide_success);
    println!("  compiled_name = {}", c.compiled_name);
    println!(
        "  extensions = .{} -> .{}",
        c.source_extension, c.output_extension
    );
    println!();

    println!("rules ({}), first match wins:", rules.len());
    for (idx, rule) in rules.iter().enumerate() {
        match rule.output() {
            Some(output) => println!("  {idx}. {} -> {output}", rule.pattern()),
            None => println!("  {idx}. {}", rule.pattern()),
        }
    }

    debug!("dry-run complete (nothing compiled)");
}
