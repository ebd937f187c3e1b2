// tests/remove_batch.rs

mod common;
use crate::common::fakes::FakeCompiler;
use crate::common::init_tracing;

use std::error::Error;

use tmplwatch::batch::{compile_batch, group, remove_batch, BatchSettings};
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
fn removes_exactly_what_compiling_wrote() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("templates/widgets/button.tmpl", "<button/>");
    fs.add_file("templates/widgets/card.tmpl", "<card/>");
    let rules = vec![WatchRule::new(r"templates/(.+)\.tmpl")?];

    let paths = ["templates/widgets/button.tmpl", "templates/widgets/card.tmpl"];
    let grouped = group(&rules, &paths, "build", false);
    let report = compile_batch(&fs, &FakeCompiler::new(), &NullReporter, &grouped, &settings())?;
    assert_eq!(report.written, vec!["build/widgets/button.js", "build/widgets/card.js"]);

    let removed = remove_batch(
        &fs,
        &rules,
        &["templates/widgets/button.tmpl"],
        "build",
        false,
        &settings(),
    )?;

    assert_eq!(removed, vec!["build/widgets/button.js"]);
    assert!(fs.contents("build/widgets/button.js").is_none());
    assert!(fs.contents("build/widgets/card.js").is_some());
    Ok(())
}

#[test]
fn second_removal_is_a_no_op() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("build/widgets/button.js", "generated");
    let rules = vec![WatchRule::new(r"templates/(.+)\.tmpl")?];
    let paths = ["templates/widgets/button.tmpl"];

    let first = remove_batch(&fs, &rules, &paths, "build", false, &settings())?;
    let second = remove_batch(&fs, &rules, &paths, "build", false, &settings())?;

    assert_eq!(first, vec!["build/widgets/button.js"]);
    assert!(second.is_empty());
    Ok(())
}

#[test]
fn never_generated_output_is_skipped() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    let rules = vec![WatchRule::new(r"templates/(.+)\.tmpl")?];

    let removed = remove_batch(
        &fs,
        &rules,
        &["templates/never_compiled.tmpl"],
        "build",
        false,
        &settings(),
    )?;

    assert!(removed.is_empty());
    Ok(())
}

#[test]
fn shallow_removal_targets_flat_output() -> TestResult {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("build/button.js", "flat");
    fs.add_file("build/widgets/button.js", "nested");
    let rules = vec![WatchRule::new(r"templates/(.+)\.tmpl")?];

    let removed = remove_batch(
        &fs,
        &rules,
        &["templates/widgets/button.tmpl"],
        "build",
        true,
        &settings(),
    )?;

    assert_eq!(removed, vec!["build/button.js"]);
    assert!(fs.contents("build/widgets/button.js").is_some());
    Ok(())
}

#[test]
fn unmatched_removed_paths_touch_nothing() -> TestResult {
    let fs = MockFileSystem::new();
    fs.add_file("build/stray.js", "keep me");
    let rules = vec![WatchRule::new(r"^templates/(.+)\.tmpl$")?];

    let removed = remove_batch(&fs, &rules, &["other/stray.tmpl"], "build", false, &settings())?;

    assert!(removed.is_empty());
    assert!(fs.contents("build/stray.js").is_some());
    Ok(())
}
