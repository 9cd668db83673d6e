use predicates::prelude::*;
use std::fs;

use crate::support::TestProject;

/// Contract tests for `botenv setup`

#[test]
fn test_setup_installs_every_extra() {
    let project = TestProject::new();

    project
        .setup()
        .assert()
        .success()
        .stdout(predicate::str::contains("Using Python 3.11.9"))
        .stdout(predicate::str::contains("5 dependencies"))
        .stdout(predicate::str::contains("all (kalman, stream)"))
        .stdout(predicate::str::contains("Environment ready"));

    let calls = project.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], format!("env use {}", project.python.display()));
    assert_eq!(calls[1], "install --all-extras");
    assert!(project.root.join(".botenv").join("state.json").exists());
}

#[test]
fn test_setup_missing_interpreter_installs_nothing() {
    let project = TestProject::new();
    let missing = project.root.join("no-such-python3.11");

    project
        .botenv()
        .current_dir(&project.root)
        .args(["setup", "--python"])
        .arg(&missing)
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("Python interpreter not found"));

    assert!(project.calls().is_empty());
    assert!(!project.root.join(".botenv").exists());
}

#[test]
fn test_setup_interpreter_from_environment() {
    let project = TestProject::new();

    project
        .botenv()
        .current_dir(&project.root)
        .env("BOTENV_PYTHON", &project.python)
        .arg("setup")
        .assert()
        .success();

    assert_eq!(project.calls()[0], format!("env use {}", project.python.display()));
}

#[test]
fn test_setup_interpreter_from_project_config() {
    let project = TestProject::new();
    project.write_config(&format!(
        "[setup]\npython = \"{}\"\n",
        project.python.display()
    ));

    project
        .botenv()
        .current_dir(&project.root)
        .arg("setup")
        .assert()
        .success();

    assert_eq!(project.calls().len(), 2);
}

#[test]
fn test_setup_missing_manifest() {
    let project = TestProject::with_manifest(None);

    project
        .setup()
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Manifest not found"));

    assert!(project.calls().is_empty());
}

#[test]
fn test_setup_malformed_manifest() {
    let project = TestProject::with_manifest(Some("[tool.poetry\nname = "));

    project
        .setup()
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Invalid manifest"));

    assert!(project.calls().is_empty());
}

#[test]
fn test_setup_selected_extras() {
    let project = TestProject::new();

    project
        .setup()
        .args(["--extra", "kalman"])
        .assert()
        .success();

    assert_eq!(project.calls()[1], "install --extras kalman");
}

#[test]
fn test_setup_unknown_extra() {
    let project = TestProject::new();

    project
        .setup()
        .args(["--extra", "gpu"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Extra 'gpu' is not declared"))
        .stderr(predicate::str::contains("kalman, stream"));

    assert!(project.calls().is_empty());
}

#[test]
fn test_setup_dry_run() {
    let project = TestProject::new();

    project
        .setup()
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Would run:"))
        .stdout(predicate::str::contains("install --all-extras"));

    assert!(project.calls().is_empty());
    assert!(!project.root.join(".botenv").exists());
}

#[test]
fn test_setup_stops_at_first_failure() {
    let project = TestProject::new();

    project
        .setup()
        .env("FAKE_FAIL_STEP", "env")
        .assert()
        .failure()
        .code(9)
        .stderr(predicate::str::contains("fake failure in env"))
        .stderr(predicate::str::contains("failed with exit code 9"));

    assert_eq!(project.calls().len(), 1);
    assert!(!project.root.join(".fake-venv").join("installed").exists());
}

#[test]
fn test_setup_with_uv() {
    let project = TestProject::new();

    project
        .setup()
        .args(["--package-manager", "uv"])
        .assert()
        .success();

    let calls = project.calls();
    assert_eq!(calls[0], format!("venv --python {}", project.python.display()));
    assert_eq!(calls[1], "sync --all-extras");
}

#[test]
fn test_setup_from_project_dir_flag() {
    let project = TestProject::new();

    project
        .botenv()
        .current_dir(project.elsewhere.path())
        .arg("setup")
        .arg("--python")
        .arg(&project.python)
        .arg("--project-dir")
        .arg(&project.root)
        .assert()
        .success();

    assert_eq!(project.calls().len(), 2);
    assert!(fs::read_dir(project.elsewhere.path()).unwrap().next().is_none());
}

#[test]
fn test_setup_relative_interpreter_with_project_dir() {
    let project = TestProject::new();
    let parent = project.root.parent().unwrap();
    let relative_python = project.python.strip_prefix(parent).unwrap();

    project
        .botenv()
        .current_dir(parent)
        .arg("setup")
        .arg("--python")
        .arg(relative_python)
        .arg("--project-dir")
        .arg(&project.root)
        .assert()
        .success();

    // The package manager runs in the project dir, so it must get the absolute path
    let calls = project.calls();
    assert_eq!(calls[0], format!("env use {}", project.python.display()));

    let stamp = fs::read_to_string(project.root.join(".botenv").join("state.json")).unwrap();
    let stamp: serde_json::Value = serde_json::from_str(&stamp).unwrap();
    assert_eq!(stamp["interpreter"], project.python.display().to_string());
}
