//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::process;
use tempfile::TempDir;

/// Creates a temporary Git repository with one commit for CLI testing.
fn create_test_repo() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = temp.path();

    for args in [
        vec!["init"],
        vec!["config", "user.email", "test@example.com"],
        vec!["config", "user.name", "Test User"],
        vec!["config", "commit.gpgsign", "false"],
    ] {
        process::Command::new("git")
            .args(&args)
            .current_dir(path)
            .output()
            .expect("Failed to run git");
    }

    std::fs::write(path.join("README.md"), "# Test\n").expect("Failed to write file");

    process::Command::new("git")
        .args(["add", "."])
        .current_dir(path)
        .output()
        .expect("Failed to add files");

    process::Command::new("git")
        .args(["commit", "-m", "Initial commit"])
        .current_dir(path)
        .output()
        .expect("Failed to commit");

    temp
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin("treesql").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("SQL query engine for Git file history"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("treesql").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("treesql"));
}

#[test]
fn test_tables_command() {
    let mut cmd = Command::cargo_bin("treesql").unwrap();
    cmd.arg("tables")
        .assert()
        .success()
        .stdout(predicate::str::contains("files"));
}

#[test]
fn test_schema_command() {
    let mut cmd = Command::cargo_bin("treesql").unwrap();
    cmd.args(["schema", "files"])
        .assert()
        .success()
        .stdout(predicate::str::contains("commit_id"))
        .stdout(predicate::str::contains("contents"));
}

#[test]
fn test_schema_unknown_table() {
    let mut cmd = Command::cargo_bin("treesql").unwrap();
    cmd.args(["schema", "commits"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Table not found"));
}

#[test]
fn test_examples_command() {
    let mut cmd = Command::cargo_bin("treesql").unwrap();
    cmd.arg("examples")
        .assert()
        .success()
        .stdout(predicate::str::contains("SELECT"));
}

#[test]
fn test_query_execution() {
    let temp = create_test_repo();

    let mut cmd = Command::cargo_bin("treesql").unwrap();
    cmd.args(["--repo", temp.path().to_str().unwrap()])
        .arg("SELECT name, contents FROM files")
        .assert()
        .success()
        .stdout(predicate::str::contains("README.md"))
        .stdout(predicate::str::contains("# Test"));
}

#[test]
fn test_repo_from_env() {
    let temp = create_test_repo();

    let mut cmd = Command::cargo_bin("treesql").unwrap();
    cmd.env("TREESQL_REPO", temp.path())
        .args(["--format", "csv", "SELECT name FROM files"])
        .assert()
        .success()
        .stdout("name\nREADME.md\n");
}

#[test]
fn test_json_output() {
    let temp = create_test_repo();

    let mut cmd = Command::cargo_bin("treesql").unwrap();
    cmd.args(["--repo", temp.path().to_str().unwrap(), "--format", "json"])
        .arg("SELECT name, file_id FROM files")
        .assert()
        .success()
        .stdout(predicate::str::contains("["))
        .stdout(predicate::str::contains("\"file_id\""));
}

#[test]
fn test_csv_output() {
    let temp = create_test_repo();

    let mut cmd = Command::cargo_bin("treesql").unwrap();
    cmd.args(["--repo", temp.path().to_str().unwrap(), "--format", "csv"])
        .arg("SELECT commit_id, name FROM files")
        .assert()
        .success()
        .stdout(predicate::str::contains("commit_id,name"));
}

#[test]
fn test_nonexistent_repo() {
    let mut cmd = Command::cargo_bin("treesql").unwrap();
    cmd.args(["--repo", "/nonexistent/path"])
        .arg("SELECT * FROM files")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Repository not found"));
}
