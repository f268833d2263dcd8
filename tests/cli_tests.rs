//! CLI integration tests using the REAL family-loader binary

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

use common::TestWorkspace;

fn family_loader_cmd() -> Command {
    Command::new(TestWorkspace::family_loader_bin())
}

#[test]
fn test_help_output() {
    family_loader_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("version"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_run_help_lists_flags() {
    family_loader_cmd()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--pattern"))
        .stdout(predicate::str::contains("--first-only"));
}

#[test]
fn test_version_output() {
    family_loader_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("family-loader"))
        .stdout(predicate::str::contains("Build info"))
        .stdout(predicate::str::contains("Package format: 1"));
}

#[test]
fn test_completions_bash() {
    family_loader_cmd()
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("family-loader"));
}

#[test]
fn test_completions_unknown_shell() {
    family_loader_cmd()
        .args(["completions", "--shell", "tcsh"])
        .assert()
        .failure();
}

#[test]
fn test_unknown_command() {
    family_loader_cmd().arg("install").assert().failure();
}

#[test]
fn test_invalid_units() {
    let workspace = TestWorkspace::new();
    workspace
        .cmd()
        .args(["run", "--units", "cubits"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown unit system"));
}

#[test]
fn test_workspace_config_with_unknown_key() {
    let workspace = TestWorkspace::new();
    workspace.write_file("family-loader.yaml", "patern: \"*.pkg\"\n");
    workspace.write_package("desk.pkg", "Desk", &["1200x600"]);

    workspace
        .cmd()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse configuration file"));
    assert!(!workspace.file_exists("outputFile.json"));
}

#[test]
fn test_explicit_config_file() {
    let workspace = TestWorkspace::new();
    workspace.write_file("ci/loader.yaml", "output_file: ci.json\n");
    workspace.write_package("desk.pkg", "Desk", &["1200x600"]);

    workspace
        .cmd()
        .args(["run", "--config", "ci/loader.yaml"])
        .assert()
        .success();
    assert!(workspace.file_exists("ci.json"));
    assert!(!workspace.file_exists("outputFile.json"));
}

#[test]
fn test_global_config_is_layered_under_workspace() {
    let workspace = TestWorkspace::new();
    workspace.write_global_config("output_file: global.json\nunit_system: imperial\n");
    workspace.write_file("family-loader.yaml", "output_file: local.json\n");
    workspace.write_package("desk.pkg", "Desk", &["1200x600"]);

    workspace.cmd().arg("run").assert().success();

    assert!(workspace.file_exists("local.json"));
    assert!(!workspace.file_exists("global.json"));
    let artifact = workspace.read_json("local.json");
    assert_eq!(artifact["unit_system"], "imperial");
    assert_eq!(artifact["template"], "Imperial Default");
}
