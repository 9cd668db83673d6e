use predicates::prelude::*;

use crate::support::TestProject;

/// End-to-end: provision once, then launch repeatedly from anywhere

#[test]
fn test_setup_then_launch() {
    let project = TestProject::new();

    // Launch before setup cannot find the entry point
    project
        .launch()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Command not found: bots"));

    project.setup().assert().success();

    let expected = format!("SEARCH_PATH={}", project.source_dir().display());
    let first = project
        .launch()
        .assert()
        .success()
        .stdout(predicate::str::contains("ENTRY=bots"))
        .stdout(predicate::str::contains(expected.clone()))
        .get_output()
        .stdout
        .clone();

    let second = project.launch().output().unwrap();
    assert_eq!(first, second.stdout);

    assert_eq!(
        project.calls(),
        vec![
            "run bots".to_string(),
            format!("env use {}", project.python.display()),
            "install --all-extras".to_string(),
            "run bots".to_string(),
            "run bots".to_string(),
        ]
    );
}

#[test]
fn test_setup_twice_is_repeatable() {
    let project = TestProject::new();

    project.setup().assert().success();
    project.setup().assert().success();

    assert_eq!(project.calls().len(), 4);
    project.launch().assert().success();
}

#[test]
fn test_uv_project_end_to_end() {
    let project = TestProject::with_manifest(Some(
        r#"
[project]
name = "binance-bots"
version = "0.1.0"
requires-python = ">=3.11"
dependencies = ["python-binance>=1.0.19", "loguru"]

[project.optional-dependencies]
kalman = ["pykalman>=0.9"]

[project.scripts]
bots = "bot_models.async_main:run_system"
"#,
    ));
    project.write_config("[setup]\npackage_manager = \"uv\"\n");

    project
        .setup()
        .assert()
        .success()
        .stdout(predicate::str::contains("2 dependencies"));

    project
        .launch()
        .assert()
        .success()
        .stdout(predicate::str::contains("ENTRY=bots"));

    let calls = project.calls();
    assert_eq!(calls[1], "sync --all-extras");
    assert_eq!(calls[2], "run bots");
}
