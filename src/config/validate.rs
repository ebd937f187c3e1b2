// src/config/validate.rs

use regex::Regex;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, TmplwatchError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::TmplwatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.watch))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_output(cfg)?;
    validate_extensions(cfg)?;
    ensure_has_rules(cfg)?;
    validate_patterns(cfg)?;
    Ok(())
}

fn validate_output(cfg: &RawConfigFile) -> Result<()> {
    if cfg.config.output.trim().is_empty() {
        return Err(TmplwatchError::ConfigError(
            "[config].output must name the directory generated files go to".to_string(),
        ));
    }
    Ok(())
}

fn validate_extensions(cfg: &RawConfigFile) -> Result<()> {
    for (key, ext) in [
        ("source_extension", &cfg.config.source_extension),
        ("output_extension", &cfg.config.output_extension),
    ] {
        if ext.is_empty() {
            return Err(TmplwatchError::ConfigError(format!(
                "[config].{key} must not be empty"
            )));
        }
        if ext.starts_with('.') || ext.contains('/') {
            return Err(TmplwatchError::ConfigError(format!(
                "[config].{key} must be a bare extension like \"js\" (got {ext:?})"
            )));
        }
    }
    Ok(())
}

fn ensure_has_rules(cfg: &RawConfigFile) -> Result<()> {
    let has_input = cfg.config.input.as_deref().is_some_and(|i| !i.is_empty());
    if cfg.watch.is_empty() && !has_input {
        return Err(TmplwatchError::ConfigError(
            "config must set [config].input or contain at least one [[watch]] rule".to_string(),
        ));
    }
    Ok(())
}

fn validate_patterns(cfg: &RawConfigFile) -> Result<()> {
    for rule in cfg.watch.iter() {
        Regex::new(&rule.pattern).map_err(|source| TmplwatchError::InvalidPattern {
            pattern: rule.pattern.clone(),
            source,
        })?;
        if matches!(rule.output.as_deref(), Some(o) if o.trim().is_empty()) {
            return Err(TmplwatchError::ConfigError(format!(
                "[[watch]] rule {:?} has an empty output",
                rule.pattern
            )));
        }
    }
    Ok(())
}
