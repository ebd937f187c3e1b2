#![allow(dead_code)]

use std::sync::Arc;

use tmplwatch::config::{ConfigFile, ConfigSection, RawConfigFile, WatchConfig};
use tmplwatch::engine::Runner;
use tmplwatch::fs::mock::MockFileSystem;

use crate::fakes::{FakeCompiler, RecordingReporter};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    /// Config writing to `output`, with `.tmpl` sources.
    pub fn new(output: &str) -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection {
                    output: output.to_string(),
                    source_extension: "tmpl".to_string(),
                    ..ConfigSection::default()
                },
                watch: Vec::new(),
            },
        }
    }

    pub fn with_rule(mut self, pattern: &str) -> Self {
        self.config.watch.push(WatchConfig {
            pattern: pattern.to_string(),
            output: None,
        });
        self
    }

    pub fn with_rule_output(mut self, pattern: &str, output: &str) -> Self {
        self.config.watch.push(WatchConfig {
            pattern: pattern.to_string(),
            output: Some(output.to_string()),
        });
        self
    }

    pub fn input(mut self, input: &str) -> Self {
        self.config.config.input = Some(input.to_string());
        self
    }

    pub fn shallow(mut self, val: bool) -> Self {
        self.config.config.shallow = val;
        self
    }

    pub fn hide_success(mut self, val: bool) -> Self {
        self.config.config.hide_success = val;
        self
    }

    pub fn message(mut self, message: &str) -> Self {
        self.config.config.message = Some(message.to_string());
        self
    }

    pub fn extensions(mut self, source: &str, output: &str) -> Self {
        self.config.config.source_extension = source.to_string();
        self.config.config.output_extension = output.to_string();
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

/// A runner over a mock filesystem with a fake compiler and a recording
/// reporter, plus handles to inspect all three.
pub struct TestRig {
    pub fs: MockFileSystem,
    pub compiler: FakeCompiler,
    pub reporter: RecordingReporter,
    pub runner: Runner,
}

impl TestRig {
    pub fn new(cfg: &ConfigFile) -> Self {
        Self::with_fs(cfg, MockFileSystem::new())
    }

    pub fn with_fs(cfg: &ConfigFile, fs: MockFileSystem) -> Self {
        let compiler = FakeCompiler::new();
        let reporter = RecordingReporter::new();
        let runner = Runner::from_config(
            cfg,
            Arc::new(fs.clone()),
            Arc::new(compiler.clone()),
            Arc::new(reporter.clone()),
        )
        .expect("Failed to build runner from config");
        Self {
            fs,
            compiler,
            reporter,
            runner,
        }
    }
}
