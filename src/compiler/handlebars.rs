// src/compiler/handlebars.rs

use ::handlebars::Template;
use tracing::debug;

use super::{CompileFailure, CompileOptions, TemplateCompiler};

/// Compiles Handlebars templates into browser-side JavaScript modules.
///
/// The template is parsed with the `handlebars` crate so syntax errors are
/// caught at build time; the emitted module then registers the source under
/// its logical name for the client-side runtime to compile.
#[derive(Debug, Clone, Default)]
pub struct HandlebarsJsCompiler;

impl HandlebarsJsCompiler {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateCompiler for HandlebarsJsCompiler {
    fn compile(
        &self,
        name: &str,
        source: &str,
        options: &CompileOptions,
    ) -> Result<String, CompileFailure> {
        Template::compile(source).map_err(|e| CompileFailure::new(e.to_string()))?;

        let name_literal = js_string(name)?;
        let source_literal = js_string(source)?;
        debug!(template = %name, "template parsed");

        let statement = if options.emberjs {
            format!("Ember.TEMPLATES[{name_literal}] = Ember.Handlebars.compile({source_literal});")
        } else if options.bare {
            format!(
                "Handlebars.templates = Handlebars.templates || {{}};\n\
                 Handlebars.templates[{name_literal}] = Handlebars.compile({source_literal});"
            )
        } else {
            format!(
                "var templates = Handlebars.templates = Handlebars.templates || {{}};\n  \
                 templates[{name_literal}] = Handlebars.compile({source_literal});"
            )
        };

        if options.bare || options.emberjs {
            Ok(format!("{statement}\n"))
        } else {
            Ok(format!("(function() {{\n  {statement}\n}})();\n"))
        }
    }
}

/// Quote `s` as a JavaScript string literal.
fn js_string(s: &str) -> Result<String, CompileFailure> {
    serde_json::to_string(s).map_err(|e| CompileFailure::new(format!("escaping template: {e}")))
}
