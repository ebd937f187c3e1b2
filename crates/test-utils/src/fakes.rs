use std::sync::{Arc, Mutex};

use tmplwatch::compiler::{CompileFailure, CompileOptions, TemplateCompiler};
use tmplwatch::report::Reporter;
use tmplwatch::types::NotifyKind;

/// Marker that makes [`FakeCompiler`] reject a template.
pub const SYNTAX_ERROR: &str = "{{SYNTAX ERROR";

/// A compiler that:
/// - records the logical name of every template it was asked to compile
/// - fails any template containing [`SYNTAX_ERROR`]
/// - otherwise returns `compiled(<name>):<source>`.
#[derive(Debug, Clone, Default)]
pub struct FakeCompiler {
    calls: Arc<Mutex<Vec<String>>>,
}

impl FakeCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn expected_output(name: &str, source: &str) -> String {
        format!("compiled({name}):{source}")
    }
}

impl TemplateCompiler for FakeCompiler {
    fn compile(
        &self,
        name: &str,
        source: &str,
        _options: &CompileOptions,
    ) -> Result<String, CompileFailure> {
        self.calls.lock().unwrap().push(name.to_string());
        if source.contains(SYNTAX_ERROR) {
            return Err(CompileFailure::new(format!("Parse error in {name}")));
        }
        Ok(Self::expected_output(name, source))
    }
}

/// One call received by [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Success(String),
    Error(String),
    Notify {
        message: String,
        title: String,
        kind: NotifyKind,
    },
}

/// Reporter that keeps every call for later assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn is_silent(&self) -> bool {
        self.notices.lock().unwrap().is_empty()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Error(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Success(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    /// `(message, kind)` of every end-of-run notification.
    pub fn notifications(&self) -> Vec<(String, NotifyKind)> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Notify { message, kind, .. } => Some((message, kind)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.notices.lock().unwrap().clear();
    }

    fn push(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.push(Notice::Info(message.to_string()));
    }

    fn success(&self, message: &str) {
        self.push(Notice::Success(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Notice::Error(message.to_string()));
    }

    fn notify(&self, message: &str, title: &str, kind: NotifyKind) {
        self.push(Notice::Notify {
            message: message.to_string(),
            title: title.to_string(),
            kind,
        });
    }
}
