// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Read a `Tmplwatch.toml` without checking it: `[config]` defaults are
/// filled in, but rule patterns are not compiled yet.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Read a `Tmplwatch.toml` and reject configs no run could use: an empty
/// output root, a bad extension, no rule at all (neither `[[watch]]` nor
/// `input`) or a pattern that does not compile.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}
