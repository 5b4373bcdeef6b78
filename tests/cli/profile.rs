//! Tests for `credvault profile` commands.

use crate::support::*;

#[test]
fn test_save_and_list() {
    let t = Test::created(EMAIL, PASSWORD);

    let output = t.profile(&["save", "work", "--description", "day job"]);
    assert_success(&output);
    assert_stdout_contains(&output, "saved profile");

    let output = t.profile(&["list"]);
    assert_success(&output);
    assert_stdout_contains(&output, "work");
    assert_stdout_contains(&output, "day job");
}

#[test]
fn test_list_empty() {
    let t = Test::new();

    let output = t.profile(&["list", "--json"]);
    assert_success(&output);
    let doc = stdout_json(&output);
    assert_eq!(doc["count"], 0);
    assert!(doc["profiles"].as_array().unwrap().is_empty());
}

#[test]
fn test_save_duplicate_fails() {
    let t = Test::created(EMAIL, PASSWORD);
    assert_success(&t.profile(&["save", "work"]));

    let output = t.profile(&["save", "work"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "already exists");
}

#[test]
fn test_commands_use_profile() {
    let t = Test::new();
    assert_success(&t.create_with(
        "work@example.com",
        "w",
        &["--base-dir", "work", "--save-as", "work"],
    ));
    assert_success(&t.create_with(
        "me@example.com",
        "p",
        &["--base-dir", "personal", "--save-as", "personal"],
    ));

    let output = t.with_profile("work", &["get", "email"]);
    assert_success(&output);
    assert_eq!(stdout(&output).trim(), "work@example.com");

    let output = t.with_profile("personal", &["get", "email"]);
    assert_eq!(stdout(&output).trim(), "me@example.com");

    let output = t.with_profile("personal", &["check", "--json"]);
    assert_success(&output);
}

#[test]
fn test_profile_from_env() {
    let t = Test::new();
    assert_success(&t.create_with(EMAIL, PASSWORD, &["--save-as", "bot"]));

    let output = t
        .cmd()
        .env("CREDVAULT_PROFILE", "bot")
        .args(["show", "--json"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout_json(&output)["profile"], "bot");
}

#[test]
fn test_unknown_profile() {
    let t = Test::new();

    let output = t.with_profile("ghost", &["show"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "profile not found");
    assert_stderr_contains(&output, "credvault profile list");
}

#[test]
fn test_status_reports_drift() {
    let t = Test::created(EMAIL, PASSWORD);
    assert_success(&t.profile(&["save", "bot"]));
    std::fs::remove_file(t.credentials_file()).unwrap();

    let output = t.profile(&["status", "bot", "--json"]);
    assert_success(&output);
    let doc = stdout_json(&output);
    assert_eq!(doc["registered"], true);
    assert_eq!(doc["files"]["directory_exists"], true);
    assert_eq!(doc["files"]["credentials_exists"], false);
    assert_eq!(doc["files"]["key_exists"], true);
}

#[test]
fn test_status_all() {
    let t = Test::created(EMAIL, PASSWORD);
    assert_success(&t.profile(&["save", "a"]));
    assert_success(&t.profile(&["save", "b"]));

    let output = t.profile(&["status", "--all", "--json"]);
    assert_success(&output);
    let doc = stdout_json(&output);
    let statuses = doc.as_array().unwrap();
    assert_eq!(statuses.len(), 2);
    assert_eq!(statuses[0]["name"], "a");
    assert_eq!(statuses[0]["files"]["key_exists"], true);
}

#[test]
fn test_describe_and_rm() {
    let t = Test::created(EMAIL, PASSWORD);
    assert_success(&t.profile(&["save", "bot"]));

    assert_success(&t.profile(&["describe", "bot", "release signing"]));
    let doc = stdout_json(&t.profile(&["list", "--json"]));
    assert_eq!(doc["profiles"][0]["description"], "release signing");

    let output = t.profile(&["rm", "bot"]);
    assert_success(&output);
    assert_stdout_contains(&output, "removed profile");

    let doc = stdout_json(&t.profile(&["list", "--json"]));
    assert_eq!(doc["count"], 0);
    // Unregistering leaves the files alone.
    assert!(t.credentials_file().is_file());
}

#[test]
fn test_rm_unknown() {
    let t = Test::new();

    let output = t.profile(&["rm", "ghost"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "profile not found");
}
