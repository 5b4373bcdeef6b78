//! Tests for `credvault check`.

use crate::support::*;

#[test]
fn test_check_secure() {
    let t = Test::created(EMAIL, PASSWORD);

    let output = t.check();
    assert_success(&output);
    assert_stdout_contains(&output, "secure");
}

#[test]
fn test_check_json_secure() {
    let t = Test::created(EMAIL, PASSWORD);

    let output = t.check_json();
    assert_success(&output);
    let doc = stdout_json(&output);

    assert_eq!(doc["overall_status"], "secure");
    let checks = doc["checks"].as_array().unwrap();
    assert_eq!(checks.len(), 3);
    assert!(checks.iter().all(|c| c["code"] == 0));
}

#[test]
fn test_check_json_missing() {
    let t = Test::new();

    let output = t.check_json();
    assert_failure(&output);
    let doc = stdout_json(&output);

    assert_eq!(doc["overall_status"], "insecure");
    assert_eq!(doc["checks"][0]["code"], 103);
    assert_eq!(doc["checks"][1]["code"], 171);
    assert_eq!(doc["checks"][2]["code"], 160);
}

#[test]
fn test_check_binary() {
    let t = Test::created(EMAIL, PASSWORD);

    let output = t.check_binary();
    assert_success(&output);
    assert_eq!(binary_codes(&output), [0, 0, 0]);
}

#[test]
fn test_check_binary_missing_key() {
    let t = Test::created(EMAIL, PASSWORD);
    std::fs::remove_file(t.key_file()).unwrap();

    let output = t.check_binary();
    assert_failure(&output);
    assert_eq!(binary_codes(&output), [0, 0, 101]);
}

#[test]
#[cfg(unix)]
fn test_check_reports_loose_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::created(EMAIL, PASSWORD);
    std::fs::set_permissions(t.credentials_file(), std::fs::Permissions::from_mode(0o644))
        .unwrap();

    let output = t.check();
    assert_failure(&output);
    assert_stdout_contains(&output, "insecure");
    assert_stderr_contains(&output, "chmod");

    let output = t.check_binary();
    assert_eq!(binary_codes(&output), [0, 142, 0]);
}

#[test]
#[cfg(unix)]
fn test_check_open_directory_reports_key_file() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::created(EMAIL, PASSWORD);
    std::fs::set_permissions(t.secure_dir(), std::fs::Permissions::from_mode(0o755)).unwrap();
    std::fs::set_permissions(t.key_file(), std::fs::Permissions::from_mode(0o644)).unwrap();

    let output = t.check_binary();
    assert_eq!(binary_codes(&output), [0, 0, 141]);
}

#[test]
fn test_check_json_and_binary_conflict() {
    let t = Test::new();

    let output = t.cmd().args(["check", "--json", "--binary"]).output().unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
