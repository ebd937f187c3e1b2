// tests/compile_batch.rs

mod common;
use crate::common::fakes::{FakeCompiler, RecordingReporter, SYNTAX_ERROR};
use crate::common::init_tracing;

use std::error::Error;
use std::path::PathBuf;

use tmplwatch::batch::{compile_batch, group, BatchSettings, OutputGroup};
use tmplwatch::fs::mock::MockFileSystem;
use tmplwatch::report::NullReporter;
use tmplwatch::types::Extensions;
use tmplwatch::watch::WatchRule;

type TestResult = Result<(), Box<dyn Error>>;

fn settings() -> BatchSettings {
    BatchSettings {
        extensions: Extensions::new("tmpl", "js"),
        ..BatchSettings::default()
    }
}

#[test]
fn writes_nested_output_for_each_template() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("templates/widgets/button.tmpl", "<button/>");
    fs.add_file("templates/index.tmpl", "<main/>");
    let compiler = FakeCompiler::new();

    let rules = vec![WatchRule::new(r"templates/(.+)\.tmpl")?];
    let grouped = group(
        &rules,
        &["templates/widgets/button.tmpl", "templates/index.tmpl"],
        "build",
        false,
    );
    let report = compile_batch(&fs, &compiler, &NullReporter, &grouped, &settings())?;

    assert!(!report.has_errors());
    assert_eq!(report.written, vec!["build/index.js", "build/widgets/button.js"]);
    assert_eq!(
        fs.contents("build/widgets/button.js"),
        Some(FakeCompiler::expected_output(
            "templates/widgets/button",
            "<button/>"
        ))
    );
    Ok(())
}

#[test]
fn one_failing_template_does_not_block_siblings() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("a.tmpl", "fine");
    fs.add_file("b.tmpl", format!("broken {SYNTAX_ERROR}"));
    fs.add_file("c.tmpl", "also fine");
    let compiler = FakeCompiler::new();
    let reporter = RecordingReporter::new();

    let mut grouped = OutputGroup::new();
    for file in ["a.tmpl", "b.tmpl", "c.tmpl"] {
        grouped.insert("out", file);
    }
    let report = compile_batch(&fs, &compiler, &reporter, &grouped, &settings())?;

    assert_eq!(report.written, vec!["out/a.js", "out/c.js"]);
    assert_eq!(report.errors, vec!["b.tmpl: Parse error in b"]);
    assert_eq!(reporter.errors(), vec!["b.tmpl: Parse error in b"]);
    assert!(fs.contents("out/a.js").is_some());
    assert!(fs.contents("out/b.js").is_none());
    assert!(fs.contents("out/c.js").is_some());
    assert_eq!(compiler.calls(), vec!["a", "b", "c"]);
    Ok(())
}

#[test]
fn failing_template_leaves_stale_output_untouched() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("a.tmpl", format!("now broken {SYNTAX_ERROR}"));
    fs.add_file("out/a.js", "previous good output");

    let mut grouped = OutputGroup::new();
    grouped.insert("out", "a.tmpl");
    let report = compile_batch(&fs, &FakeCompiler::new(), &NullReporter, &grouped, &settings())?;

    assert!(report.written.is_empty());
    assert_eq!(report.errors.len(), 1);
    assert_eq!(fs.contents("out/a.js").as_deref(), Some("previous good output"));
    Ok(())
}

#[test]
fn non_utf8_source_fails_only_that_file() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("a.tmpl", vec![0xffu8, 0xfe]);
    fs.add_file("b.tmpl", "fine");
    let compiler = FakeCompiler::new();
    let reporter = RecordingReporter::new();

    let mut grouped = OutputGroup::new();
    grouped.insert("out", "a.tmpl");
    grouped.insert("out", "b.tmpl");
    let report = compile_batch(&fs, &compiler, &reporter, &grouped, &settings())?;

    assert_eq!(report.written, vec!["out/b.js"]);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].starts_with("a.tmpl: invalid UTF-8"));
    assert_eq!(reporter.errors(), report.errors);
    assert!(fs.contents("out/a.js").is_none());
    assert_eq!(
        fs.contents("out/b.js"),
        Some(FakeCompiler::expected_output("b", "fine"))
    );
    assert_eq!(compiler.calls(), vec!["b"]);
    Ok(())
}

#[test]
fn unreadable_source_aborts_the_batch() {
    init_tracing();
    let fs = MockFileSystem::new();

    let mut grouped = OutputGroup::new();
    grouped.insert("out", "missing.tmpl");
    let result = compile_batch(&fs, &FakeCompiler::new(), &NullReporter, &grouped, &settings());

    assert!(result.is_err());
}

#[test]
fn creates_each_missing_directory_once() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("t/x/one.tmpl", "1");
    fs.add_file("t/x/two.tmpl", "2");
    fs.add_file("t/y/three.tmpl", "3");
    fs.add_dir("build");

    let rules = vec![WatchRule::new(r"t/(.+)\.tmpl")?];
    let grouped = group(
        &rules,
        &["t/x/one.tmpl", "t/x/two.tmpl", "t/y/three.tmpl"],
        "build",
        false,
    );
    compile_batch(&fs, &FakeCompiler::new(), &NullReporter, &grouped, &settings())?;

    assert_eq!(
        fs.created_dirs(),
        vec![PathBuf::from("build/x"), PathBuf::from("build/y")]
    );

    // Directories exist now; a second batch creates nothing.
    compile_batch(&fs, &FakeCompiler::new(), &NullReporter, &grouped, &settings())?;
    assert_eq!(fs.created_dirs().len(), 2);
    Ok(())
}

#[test]
fn logical_name_strips_input_root_and_extension() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("app/templates/posts/show.tmpl", "post");
    let compiler = FakeCompiler::new();

    let settings = BatchSettings {
        input: Some("app/templates".to_string()),
        ..settings()
    };
    let mut grouped = OutputGroup::new();
    grouped.insert("public/posts", "app/templates/posts/show.tmpl");
    let report = compile_batch(&fs, &compiler, &NullReporter, &grouped, &settings)?;

    assert_eq!(compiler.calls(), vec!["posts/show"]);
    assert_eq!(report.written, vec!["public/posts/show.js"]);
    Ok(())
}

#[test]
fn write_failure_aborts_the_batch() {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("a.tmpl", "a");
    fs.add_dir("locked");
    fs.deny_writes("locked");

    let mut grouped = OutputGroup::new();
    grouped.insert("locked", "a.tmpl");
    let result = compile_batch(&fs, &FakeCompiler::new(), &NullReporter, &grouped, &settings());

    let err = result.expect_err("write into a read-only dir must fail the run");
    assert!(format!("{err:#}").contains("Permission denied"));
}

#[test]
fn colliding_outputs_are_reported_once() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("t/a/same.tmpl", "first");
    fs.add_file("t/b/same.tmpl", "second");

    let rules = vec![WatchRule::new(r"t/(.+)\.tmpl")?];
    let grouped = group(&rules, &["t/a/same.tmpl", "t/b/same.tmpl"], "flat", true);
    let report = compile_batch(&fs, &FakeCompiler::new(), &NullReporter, &grouped, &settings())?;

    assert_eq!(report.written, vec!["flat/same.js"]);
    // Last writer wins on disk.
    assert_eq!(
        fs.contents("flat/same.js"),
        Some(FakeCompiler::expected_output("t/b/same", "second"))
    );
    Ok(())
}
