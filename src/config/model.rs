// src/config/model.rs

use serde::Deserialize;

use crate::batch::BatchSettings;
use crate::compiler::CompileOptions;
use crate::types::Extensions;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [config]
/// output = "public/javascripts/templates"
/// input = "app/templates"
///
/// [[watch]]
/// pattern = "app/templates/(.+)\\.handlebars"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Global behaviour config from `[config]`.
    #[serde(default)]
    pub config: ConfigSection,

    /// Explicit watch rules from `[[watch]]`, in registration order.
    #[serde(default)]
    pub watch: Vec<WatchConfig>,
}

/// Validated configuration. Build it with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    watch: Vec<WatchConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, watch: Vec<WatchConfig>) -> Self {
        Self { config, watch }
    }

    /// Explicit `[[watch]]` rules in the order they were declared.
    pub fn watch_rules(&self) -> &[WatchConfig] {
        &self.watch
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigSection {
    /// Root directory generated files are written under.
    #[serde(default)]
    pub output: String,

    /// Source root. Stripped from template paths to form logical names, and
    /// registers an implicit watch rule `<input>/(.+\.<source_extension>)`.
    #[serde(default)]
    pub input: Option<String>,

    /// Write every generated file straight into `output`, ignoring nesting.
    #[serde(default)]
    pub shallow: bool,

    /// Skip the success notification after a clean compile run.
    #[serde(default)]
    pub hide_success: bool,

    /// Name reserved for a bundled output of all templates.
    #[serde(default = "default_compiled_name")]
    pub compiled_name: String,

    /// Compile every template once when watching starts.
    #[serde(default)]
    pub all_on_start: bool,

    #[serde(default)]
    pub bare: bool,

    #[serde(default)]
    pub emberjs: bool,

    /// Replaces the default `"Compile a, b"` start notice.
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    #[serde(default = "default_output_extension")]
    pub output_extension: String,
}

fn default_compiled_name() -> String {
    "compiled.js".to_string()
}

fn default_source_extension() -> String {
    "handlebars".to_string()
}

fn default_output_extension() -> String {
    "js".to_string()
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            output: String::new(),
            input: None,
            shallow: false,
            hide_success: false,
            compiled_name: default_compiled_name(),
            all_on_start: false,
            bare: false,
            emberjs: false,
            message: None,
            source_extension: default_source_extension(),
            output_extension: default_output_extension(),
        }
    }
}

impl ConfigSection {
    pub fn extensions(&self) -> Extensions {
        Extensions::new(&self.source_extension, &self.output_extension)
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            bare: self.bare,
            emberjs: self.emberjs,
        }
    }

    pub fn batch_settings(&self) -> BatchSettings {
        BatchSettings {
            extensions: self.extensions(),
            input: self.input.clone(),
            compile: self.compile_options(),
        }
    }
}

/// One `[[watch]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    /// Regular expression matched against template paths. Its first capture
    /// group, if any, is the path relative to the source root.
    pub pattern: String,

    /// Output root for templates matched by this rule; defaults to
    /// `[config].output`.
    #[serde(default)]
    pub output: Option<String>,
}
