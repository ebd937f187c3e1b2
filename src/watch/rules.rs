// src/watch/rules.rs

use std::fmt;

use regex::Regex;

use crate::config::ConfigFile;
use crate::errors::{Result, TmplwatchError};

/// A compiled watch rule: which templates it claims and where they go.
///
/// The first capture group of `pattern`, when present, is the template's
/// path relative to its source root and drives nested output directories.
#[derive(Clone)]
pub struct WatchRule {
    pattern: Regex,
    output: Option<String>,
}

impl fmt::Debug for WatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchRule")
            .field("pattern", &self.pattern.as_str())
            .field("output", &self.output)
            .finish()
    }
}

impl WatchRule {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|source| TmplwatchError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern,
            output: None,
        })
    }

    /// Route templates matched by this rule under `output` instead of the
    /// run's output root.
    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}

/// Rule registered for `[config].input`: every template below the input root,
/// capturing its path relative to that root.
///
/// The pattern is not anchored at the start, so absolute paths under the
/// input root are claimed too.
pub fn input_rule(input: &str, source_extension: &str) -> Result<WatchRule> {
    let pattern = format!(
        "{}/(.+\\.{})$",
        regex::escape(input.trim_end_matches('/')),
        regex::escape(source_extension)
    );
    WatchRule::new(&pattern)
}

/// Build the ordered rule list for a config: explicit `[[watch]]` rules in
/// declaration order, then the implicit input rule if `input` is set.
///
/// Order matters: when several rules match a path the first one wins.
pub fn build_rules_from_config(cfg: &ConfigFile) -> Result<Vec<WatchRule>> {
    let mut rules = Vec::with_capacity(cfg.watch_rules().len() + 1);

    for entry in cfg.watch_rules() {
        let mut rule = WatchRule::new(&entry.pattern)?;
        if let Some(output) = &entry.output {
            rule = rule.with_output(output.clone());
        }
        rules.push(rule);
    }

    if let Some(input) = cfg.config.input.as_deref().filter(|i| !i.is_empty()) {
        rules.push(input_rule(input, &cfg.config.source_extension)?);
    }

    Ok(rules)
}

/// Keep only the paths claimed by at least one rule.
pub fn match_files<S: AsRef<str>>(rules: &[WatchRule], paths: &[S]) -> Vec<String> {
    let mut matched = Vec::new();
    for path in paths {
        let path: &str = path.as_ref();
        if rules.iter().any(|r| r.matches(path)) {
            matched.push(path.to_string());
        }
    }
    matched
}
