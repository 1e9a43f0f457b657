use std::fs;

use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const PLAN: &str = r#"
name = "deploy"

[[steps]]
name = "build"
run = "true"

[[steps]]
name = "upload"
run = "false"
"#;

fn run_plan(dir: &TempDir, execution_id: &str) {
    assert_cmd::cargo::cargo_bin_cmd!("stepback")
        .args(["run", "plan.toml", "--execution-id", execution_id])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .assert()
        .code(1);
}

#[test]
fn log_prints_one_line_per_event() {
    let dir = TempDir::new().expect("failed to create temp dir");
    fs::write(dir.path().join("plan.toml"), PLAN).expect("failed to write plan.toml");
    run_plan(&dir, "alpha");

    let output = assert_cmd::cargo::cargo_bin_cmd!("stepback")
        .arg("log")
        .arg("stepback.jsonl")
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(contains("[alpha] deploy saga_started"))
        .stdout(contains("saga_aborted #1 upload (2 to compensate)"))
        .stdout(contains("step_compensating #0 build"))
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output).expect("stdout is UTF-8");
    assert_eq!(text.lines().count(), 7);
}

#[test]
fn log_filters_by_execution_id() {
    let dir = TempDir::new().expect("failed to create temp dir");
    fs::write(dir.path().join("plan.toml"), PLAN).expect("failed to write plan.toml");
    run_plan(&dir, "alpha");
    run_plan(&dir, "beta");

    assert_cmd::cargo::cargo_bin_cmd!("stepback")
        .args(["log", "stepback.jsonl", "--execution-id", "beta"])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(contains("[beta]").and(contains("[alpha]").not()));
}

#[test]
fn log_reports_unknown_execution() {
    let dir = TempDir::new().expect("failed to create temp dir");
    fs::write(dir.path().join("plan.toml"), PLAN).expect("failed to write plan.toml");
    run_plan(&dir, "alpha");

    assert_cmd::cargo::cargo_bin_cmd!("stepback")
        .args(["log", "stepback.jsonl", "--execution-id", "gamma"])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stdout(contains("No events found."));
}

#[test]
fn log_rejects_corrupt_lines() {
    let dir = TempDir::new().expect("failed to create temp dir");
    fs::write(dir.path().join("broken.jsonl"), "{not json}\n").expect("failed to write log");

    assert_cmd::cargo::cargo_bin_cmd!("stepback")
        .args(["log", "broken.jsonl"])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .assert()
        .code(2)
        .stderr(contains("error: saga log error"))
        .stderr(contains("line 1"));
}
