#![allow(deprecated)] // cargo_bin is deprecated but still supported by assert_cmd
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const Q1: &str = r#"test = {
    "name": "q1",
    "points": 2,
    "suites": [
        {"type": "concept", "cases": [{"question": "2 + 2?", "answer": "4"}]},
        {"type": "concept", "cases": [
            {"question": "Hidden", "answer": "h", "hidden": true},
            {"question": "Open", "answer": "o", "locked": false}
        ]}
    ]
}"#;

fn oktest() -> Command {
    let mut cmd = Command::cargo_bin("oktest").expect("cargo bin");
    cmd.env_remove("OKTEST_HASH_KEY")
        .env_remove("OKTEST_ASSIGNMENT")
        .env_remove("OKTEST_CONFIG");
    cmd
}

#[test]
fn run_passes_unlocked_test() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("q1.py");
    fs::write(&file, Q1).unwrap();

    oktest()
        .arg("run")
        .arg(&file)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("    Passed: 3"));
}

#[test]
fn score_prints_points() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("q1.py");
    fs::write(&file, Q1).unwrap();

    oktest()
        .arg("score")
        .arg(&file)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Score: 2 / 2"));
}

#[test]
fn lock_rewrites_file_and_run_reports_locked() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("q1.py");
    fs::write(&file, Q1).unwrap();

    oktest()
        .args(["lock", "--hash-key", "secret"])
        .arg(&file)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("* Suite 1 > Case 0: removing hidden case"));

    let locked = fs::read_to_string(&file).unwrap();
    assert!(locked.starts_with("test = {"));
    assert!(locked.contains("\"locked\": true"));
    assert!(!locked.contains("Hidden"));

    oktest()
        .arg("run")
        .arg(&file)
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "There are still locked tests! Use the -u option to unlock them",
        ));

    oktest()
        .arg("score")
        .arg(&file)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Score: 1 / 2"));
}

#[test]
fn lock_without_key_is_config_error() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("q1.py");
    fs::write(&file, Q1).unwrap();

    oktest()
        .arg("lock")
        .arg(&file)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no hash key"));
    assert_eq!(fs::read_to_string(&file).unwrap(), Q1, "file untouched");
}

#[test]
fn unknown_suite_type_is_config_error() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("q2.py");
    fs::write(
        &file,
        r#"test = {"name": "q2", "points": 1, "suites": [{"type": "doctest", "cases": []}]}"#,
    )
    .unwrap();

    oktest()
        .arg("run")
        .arg(&file)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid suite type: doctest"));
}

#[test]
fn config_file_supplies_key_for_lock() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("q1.py");
    let cfg = dir.path().join("oktest.yaml");
    fs::write(&file, Q1).unwrap();
    fs::write(&cfg, "version: 1\nassignment_name: lab00\nhash_key: secret\n").unwrap();

    oktest()
        .arg("lock")
        .arg(&file)
        .arg("--config")
        .arg(&cfg)
        .assert()
        .code(0);
    assert!(fs::read_to_string(&file).unwrap().contains("\"locked\": true"));
}
