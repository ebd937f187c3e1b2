// tests/handlebars_compiler.rs

mod common;
use crate::common::fakes::RecordingReporter;
use crate::common::init_tracing;

use std::error::Error;
use std::fs;
use std::sync::Arc;

use tmplwatch::batch::BatchSettings;
use tmplwatch::compiler::{CompileOptions, HandlebarsJsCompiler, TemplateCompiler};
use tmplwatch::engine::{RunOptions, Runner};
use tmplwatch::fs::RealFileSystem;
use tmplwatch::types::{Extensions, NotifyKind};
use tmplwatch::watch::WatchRule;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn default_output_registers_template_inside_iife() -> TestResult {
    init_tracing();
    let js = HandlebarsJsCompiler::new().compile(
        "posts/show",
        "<h1>{{title}}</h1>",
        &CompileOptions::default(),
    )?;

    assert!(js.starts_with("(function() {\n"));
    assert!(js.trim_end().ends_with("})();"));
    assert!(js.contains(r#"templates["posts/show"] = Handlebars.compile("<h1>{{title}}</h1>");"#));
    Ok(())
}

#[test]
fn bare_output_has_no_wrapper() -> TestResult {
    let options = CompileOptions {
        bare: true,
        ..CompileOptions::default()
    };
    let js = HandlebarsJsCompiler::new().compile("a", "hi", &options)?;

    assert!(!js.contains("(function()"));
    assert!(js.contains(r#"Handlebars.templates["a"] = Handlebars.compile("hi");"#));
    Ok(())
}

#[test]
fn emberjs_output_registers_with_ember() -> TestResult {
    let options = CompileOptions {
        emberjs: true,
        ..CompileOptions::default()
    };
    let js = HandlebarsJsCompiler::new().compile("app", "{{outlet}}", &options)?;

    assert_eq!(
        js,
        "Ember.TEMPLATES[\"app\"] = Ember.Handlebars.compile(\"{{outlet}}\");\n"
    );
    Ok(())
}

#[test]
fn source_is_escaped_as_a_js_string() -> TestResult {
    let js = HandlebarsJsCompiler::new().compile(
        "quote",
        "<p class=\"x\">\n{{name}}</p>",
        &CompileOptions::default(),
    )?;

    assert!(js.contains(r#""<p class=\"x\">\n{{name}}</p>""#));
    Ok(())
}

#[test]
fn mismatched_block_is_a_compile_failure() {
    init_tracing();
    let result = HandlebarsJsCompiler::new().compile(
        "broken",
        "{{#if ready}}mismatched{{/each}}",
        &CompileOptions::default(),
    );

    let failure = result.expect_err("mismatched block must not compile");
    assert!(!failure.message.is_empty());
}

#[test]
fn end_to_end_on_real_filesystem() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let root = dir.path().to_string_lossy().replace('\\', "/");
    let templates = format!("{root}/templates");
    let output = format!("{root}/build");

    fs::create_dir_all(format!("{templates}/widgets"))?;
    fs::write(format!("{templates}/widgets/button.handlebars"), "<button>{{label}}</button>")?;
    fs::write(format!("{templates}/broken.handlebars"), "{{#each items}}x{{/if}}")?;

    let reporter = RecordingReporter::new();
    let runner = Runner::new(
        Arc::new(RealFileSystem),
        Arc::new(HandlebarsJsCompiler::new()),
        Arc::new(reporter.clone()),
        vec![WatchRule::new(r"templates/(.+)\.handlebars$")?],
        BatchSettings {
            extensions: Extensions::default(),
            input: Some(templates.clone()),
            ..BatchSettings::default()
        },
        RunOptions::new(output.clone()).root(dir.path()),
    );

    let written = runner.run_all()?;

    let button = format!("{output}/widgets/button.js");
    assert_eq!(written, vec![button.clone()]);
    let js = fs::read_to_string(&button)?;
    assert!(js.contains(r#"templates["widgets/button"]"#));
    assert!(!std::path::Path::new(&format!("{output}/broken.js")).exists());

    let notifications = reporter.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].1, NotifyKind::Failed);
    assert!(notifications[0].0.contains("broken.handlebars: "));

    fs::remove_file(format!("{templates}/widgets/button.handlebars"))?;
    let removed = runner.run_on_removals(&[format!("{templates}/widgets/button.handlebars")])?;
    assert_eq!(removed, vec![button.clone()]);
    assert!(!std::path::Path::new(&button).exists());
    Ok(())
}
