//! End-to-end checks of the `datasnap` binary's command dispatch.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn datasnap(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("datasnap").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("DATASNAP_DATA_DIR")
        .env_remove("DATASNAP_DATASET")
        .env_remove("DATASNAP_PREVIEW_ROWS");
    cmd
}

#[test]
fn test_init_writes_config_and_layout() {
    let temp = TempDir::new().unwrap();

    datasnap(&temp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized datasnap project"));

    assert!(temp.path().join("datasnap.toml").is_file());
    assert!(temp.path().join("data").join("raw").is_dir());
}

#[test]
fn test_init_twice_fails_without_force() {
    let temp = TempDir::new().unwrap();
    datasnap(&temp).arg("init").assert().success();

    datasnap(&temp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    datasnap(&temp).args(["init", "--force"]).assert().success();
}

#[test]
fn test_preview_prints_header_and_rows() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("postings.csv"),
        "id,title\n1,Engineer\n2,Analyst\n3,Manager\n4,Intern\n",
    )
    .unwrap();

    datasnap(&temp)
        .args(["preview", "postings.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Manager").and(predicate::str::contains("Intern").not()));
}

#[test]
fn test_preview_missing_file_exits_with_error() {
    let temp = TempDir::new().unwrap();

    datasnap(&temp)
        .args(["preview", "missing.csv"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Input file not found"));
}
