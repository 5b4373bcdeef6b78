//! Tests for `credvault show`, `get`, and `verify`.

use crate::support::*;

#[test]
fn test_show_masks_password() {
    let t = Test::created(EMAIL, PASSWORD);

    let output = t.show(&[]);
    assert_success(&output);
    assert_stdout_contains(&output, EMAIL);
    assert_stdout_contains(&output, "********");
    assert_output_excludes(&output, PASSWORD);
}

#[test]
fn test_show_reveal() {
    let t = Test::created(EMAIL, PASSWORD);

    let output = t.show(&["--reveal"]);
    assert_success(&output);
    assert_stdout_contains(&output, PASSWORD);
}

#[test]
fn test_show_json() {
    let t = Test::new();
    assert_success(&t.create_with(EMAIL, PASSWORD, &["--field", "otp=123"]));

    let output = t.show(&["--json", "--reveal"]);
    assert_success(&output);
    let doc = stdout_json(&output);

    assert_eq!(doc["email"], EMAIL);
    assert_eq!(doc["password"], PASSWORD);
    assert!(doc["username"].is_null());
    assert!(doc["profile"].is_null());
    assert_eq!(doc["additional_data"]["otp"], "123");
}

#[test]
fn test_get_standard_fields() {
    let t = Test::created(EMAIL, PASSWORD);

    assert_eq!(stdout(&t.get("email")).trim(), EMAIL);
    assert_eq!(stdout(&t.get("password")).trim(), PASSWORD);

    // Unset standard field prints nothing.
    let output = t.get("username");
    assert_success(&output);
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_get_unknown_field() {
    let t = Test::created(EMAIL, PASSWORD);

    let output = t.get("nope");
    assert_failure(&output);
    assert_stderr_contains(&output, "field not found");
}

#[test]
fn test_verify() {
    let t = Test::created(EMAIL, PASSWORD);

    let ok = t.verify(EMAIL, PASSWORD);
    assert_success(&ok);
    assert_stdout_contains(&ok, "credentials match");

    let bad = t.verify(EMAIL, "wrong");
    assert_failure(&bad);
    assert_stderr_contains(&bad, "Invalid credentials");
}

#[test]
fn test_show_before_create() {
    let t = Test::new();

    let output = t.show(&[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "credentials file not found");
    assert_stderr_contains(&output, "credvault create");
}
