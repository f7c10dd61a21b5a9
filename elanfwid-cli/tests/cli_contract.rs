//! Integration tests for core CLI contract behavior.

use predicates::prelude::*;

fn cli_cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("elanfwid")
}

#[test]
fn help_exits_zero_and_writes_stdout_only() {
    let mut cmd = cli_cmd();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("elanfwid"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn short_help_exits_zero_and_writes_stdout_only() {
    let mut cmd = cli_cmd();
    cmd.arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("elanfwid"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn version_exits_zero_and_writes_stdout_only() {
    let mut cmd = cli_cmd();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("elanfwid"))
        .stderr(predicate::str::is_empty());
}

#[test]
fn mapping_file_requires_system() {
    let mut cmd = cli_cmd();
    cmd.args(["-f", "mapping.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--system"));
}

#[test]
fn system_requires_mapping_file() {
    let mut cmd = cli_cmd();
    cmd.args(["-s", "chrome"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--mapping-file"));
}

#[test]
fn pid_flags_are_exclusive() {
    let mut cmd = cli_cmd();
    cmd.args(["-p", "10755", "-P", "2a03"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used"));
}

#[test]
fn json_requires_dev_info() {
    let mut cmd = cli_cmd();
    cmd.arg("--json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--dev-info"));
}

#[test]
fn invalid_hex_pid_fails() {
    let mut cmd = cli_cmd();
    cmd.args(["-P", "not-hex"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid hex product ID"));
}
