//! Integration tests for the `dp` CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn dicepick() -> Command {
    Command::cargo_bin("dicepick").unwrap()
}

#[test]
fn rules_lists_colors_and_scoring() {
    dicepick()
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("white"))
        .stdout(predicate::str::contains("purple"))
        .stdout(predicate::str::contains("Scoring"))
        .stdout(predicate::str::contains("Doubled"));
}

#[test]
fn run_script_reports_status() {
    dicepick()
        .args(["run", "--seed", "ABCD1234", "--script", "status; board"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seed: ABCD1234"))
        .stdout(predicate::str::contains("Next: pick"))
        .stdout(predicate::str::contains("score 0"));
}

#[test]
fn run_picks_a_die() {
    dicepick()
        .args(["run", "--seed", "ABCD1234", "--script", "pick 1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Picked #1"));
}

#[test]
fn run_json_state() {
    dicepick()
        .args(["run", "--seed", "QWER5678", "--script", "status", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"seed\": \"QWER5678\""))
        .stdout(predicate::str::contains("\"phase\": \"in_progress\""))
        .stdout(predicate::str::contains("\"game_over\": false"));
}

#[test]
fn run_is_deterministic() {
    let script = "pick 1; roll; pick 2; roll; pick 3";
    let first = dicepick()
        .args(["run", "--seed", "ZZ99AA11", "--script", script, "--json"])
        .output()
        .unwrap();
    let second = dicepick()
        .args(["run", "--seed", "ZZ99AA11", "--script", script, "--json"])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn run_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("moves.txt");
    fs::write(&path, "# opening\nselect 2\npick\nstatus\n").unwrap();

    dicepick()
        .args(["run", "--seed", "ABCD1234", "--file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Selected #2"))
        .stdout(predicate::str::contains("Picked #2"));
}

#[test]
fn run_missing_file_fails() {
    dicepick()
        .args(["run", "--file", "/nonexistent/moves.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn run_unknown_command_fails() {
    dicepick()
        .args(["run", "--seed", "ABCD1234", "--script", "dance"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown command: dance"));
}

#[test]
fn invalid_seed_falls_back() {
    dicepick()
        .args(["run", "--seed", "bad!", "--script", "status"])
        .assert()
        .success()
        .stderr(predicate::str::contains("rejected"))
        .stdout(predicate::str::contains("Phase: in progress"));
}

#[test]
fn run_requires_commands() {
    dicepick().args(["run"]).assert().failure();
}

#[test]
fn play_reads_stdin() {
    dicepick()
        .args(["play", "--seed", "ABCD1234"])
        .write_stdin("status\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seed: ABCD1234"))
        .stdout(predicate::str::contains("Goodbye!"));
}

#[test]
fn play_reports_errors_and_continues() {
    dicepick()
        .args(["play", "--seed", "ABCD1234"])
        .write_stdin("dance\nstatus\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown command: dance"))
        .stdout(predicate::str::contains("Score: 0"));
}
