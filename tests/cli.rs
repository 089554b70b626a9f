//! CLI surface tests: exit codes, stderr messages, help text

use assert_cmd::Command;
use predicates::prelude::*;
use std::process::Command as StdCommand;
use tempfile::TempDir;

fn shears() -> Command {
    Command::cargo_bin("shears").unwrap()
}

fn git_init(dir: &std::path::Path) {
    for args in [
        vec!["init"],
        vec!["config", "user.email", "test@test.com"],
        vec!["config", "user.name", "Test"],
    ] {
        StdCommand::new("git")
            .args(&args)
            .current_dir(dir)
            .output()
            .expect("git command failed");
    }
}

#[test]
fn test_not_a_repository_exits_one() {
    let dir = TempDir::new().unwrap();
    shears()
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not in a git repository"));
}

#[test]
fn test_dirty_tree_exits_one() {
    let dir = TempDir::new().unwrap();
    git_init(dir.path());
    std::fs::write(dir.path().join("stray.py"), "x = 1\n").unwrap();

    shears()
        .current_dir(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("working tree is not clean"))
        .stderr(predicate::str::contains("stray.py"));
}

#[test]
fn test_clean_empty_repo_is_noop_success() {
    let dir = TempDir::new().unwrap();
    git_init(dir.path());

    shears()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes found"));
}

#[test]
fn test_help_mentions_flags() {
    shears()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--dry-run"))
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--color"));
}

#[test]
fn test_version_flag() {
    shears()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shears"));
}
