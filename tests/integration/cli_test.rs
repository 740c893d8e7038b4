//! CLI-level tests (non-interactive surfaces only).

use assert_cmd::Command;
use predicates::prelude::*;

use crate::helpers::{temp_log, SAMPLE_LOG};

fn logplay() -> Command {
    Command::cargo_bin("logplay").expect("binary built")
}

#[test]
fn help_shows_subcommands() {
    logplay()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("play"))
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_prints_something() {
    logplay()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("logplay"));
}

#[test]
fn info_summarizes_a_log() {
    let (_dir, path) = temp_log(SAMPLE_LOG);
    logplay()
        .arg("info")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("frames:    5"))
        .stdout(predicate::str::contains("step:      100 ms"))
        .stdout(predicate::str::contains("cycles:    0..4"))
        .stdout(predicate::str::contains("time over: yes"));
}

#[test]
fn info_reports_unfinished_match() {
    let content = "{\"version\":1,\"step_ms\":50}\n[0,\"kickoff\"]\n";
    let (_dir, path) = temp_log(content);
    logplay()
        .arg("info")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("time over: no"));
}

#[test]
fn info_fails_on_missing_file() {
    logplay()
        .arg("info")
        .arg("/nonexistent/match.matchlog")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load log"));
}

#[test]
fn info_fails_on_bad_version() {
    let (_dir, path) = temp_log("{\"version\":7}\n");
    logplay()
        .arg("info")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("version"));
}

#[test]
fn play_requires_a_file_argument() {
    logplay()
        .arg("play")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<FILE>"));
}

#[test]
fn config_path_prints_a_toml_path() {
    logplay()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
