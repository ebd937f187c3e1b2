// src/cli.rs

//! Command line for the watcher.

use clap::{Parser, ValueEnum};

/// Without `--once` or `--dry-run` the process watches until Ctrl-C.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tmplwatch",
    version,
    about = "Recompile templates into JavaScript as they change.",
    long_about = None
)]
pub struct CliArgs {
    /// Config file. Template and output paths in it are relative to the
    /// directory it lives in.
    #[arg(long, value_name = "PATH", default_value = "Tmplwatch.toml")]
    pub config: String,

    /// Compile every template once and exit, no watching.
    #[arg(long)]
    pub once: bool,

    /// Diagnostic log level; overrides `TMPLWATCH_LOG`.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Validate the config and print the rules in match order, then exit
    /// without compiling.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

pub fn parse() -> CliArgs {
    CliArgs::parse()
}
