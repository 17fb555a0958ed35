use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_eval_respects_precedence() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("lumina")
        .env("LUMINA_HOME", dir.path())
        .args(["eval", "2 + 3 * 4"])
        .assert()
        .success()
        .stdout(predicate::str::diff("14\n"));
}

#[test]
fn test_eval_parentheses() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("lumina")
        .env("LUMINA_HOME", dir.path())
        .args(["eval", "(2 + 3) * 4"])
        .assert()
        .success()
        .stdout(predicate::str::diff("20\n"));
}

#[test]
fn test_eval_groups_large_results() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("lumina")
        .env("LUMINA_HOME", dir.path())
        .args(["eval", "1234567.5 + 0"])
        .assert()
        .success()
        .stdout(predicate::str::diff("1,234,567.5\n"));
}

#[test]
fn test_eval_division_by_zero_fails() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("lumina")
        .env("LUMINA_HOME", dir.path())
        .args(["eval", "5 / 0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("evaluate"));
}

#[test]
fn test_eval_rejects_trailing_operator() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("lumina")
        .env("LUMINA_HOME", dir.path())
        .args(["eval", "2 +"])
        .assert()
        .failure();
}
