//! Error reporting and general CLI behavior.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_missing_key_file() {
    let t = Test::created(EMAIL, PASSWORD);
    std::fs::remove_file(t.key_file()).unwrap();

    t.cmd()
        .args(["get", "email"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("key file not found"))
        .stderr(predicate::str::contains("credvault create"));
}

#[test]
fn test_foreign_key_file() {
    let t = Test::created(EMAIL, PASSWORD);
    let key = std::fs::read(t.key_file()).unwrap();

    // Recreate so the credentials belong to a new key, then restore the old one.
    assert_success(&t.create(EMAIL, PASSWORD));
    std::fs::write(t.key_file(), key).unwrap();

    let output = t.show(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "decryption");
    assert_output_excludes(&output, PASSWORD);
}

#[test]
fn test_tampered_credentials() {
    let t = Test::created(EMAIL, PASSWORD);
    let mut blob = std::fs::read(t.credentials_file()).unwrap();
    let last = blob.len() - 1;
    blob[last] ^= 0x01;
    std::fs::write(t.credentials_file(), blob).unwrap();

    let output = t.verify(EMAIL, PASSWORD);
    assert_failure(&output);
    assert_stderr_contains(&output, "decryption");
}

#[test]
fn test_no_subcommand_shows_usage() {
    let t = Test::new();

    t.cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_completions() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("credvault"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let t = Test::created(EMAIL, PASSWORD);

    let output = t.cmd().args(["--verbose", "get", "email"]).output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), EMAIL);
    assert_output_excludes(&output, PASSWORD);
}
