// src/types.rs

//! Small value types shared across the batch, engine and watch layers.

/// A template source file as supplied by the host (relative or absolute).
pub type SourcePath = String;

/// Recognised source extension and the extension generated files get.
///
/// Both are stored without the leading dot (`"handlebars"`, `"js"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extensions {
    source: String,
    output: String,
}

impl Extensions {
    pub fn new(source: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// True if `path` ends in `.<source>`.
    pub fn is_source(&self, path: &str) -> bool {
        path.strip_suffix(self.source.as_str())
            .is_some_and(|rest| rest.ends_with('.'))
    }

    /// Strip the trailing `.<source>` from `path`, if present.
    pub fn strip_source<'a>(&self, path: &'a str) -> &'a str {
        path.strip_suffix(self.source.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
            .unwrap_or(path)
    }

    /// Base file name of the generated file for `path`
    /// (`templates/a/b.handlebars` -> `b.js`).
    pub fn output_file_name(&self, path: &str) -> String {
        let stem = self.strip_source(path);
        let base = stem.rsplit('/').next().unwrap_or(stem);
        format!("{base}.{}", self.output)
    }
}

impl Default for Extensions {
    fn default() -> Self {
        Self::new("handlebars", "js")
    }
}

/// Severity attached to a notification handed to a [`crate::report::Reporter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Failed,
}
