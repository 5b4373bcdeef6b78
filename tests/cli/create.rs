//! Tests for `credvault create`.

use crate::support::*;

#[test]
fn test_create_writes_artifacts() {
    let t = Test::new();

    let output = t.create(EMAIL, PASSWORD);
    assert_success(&output);
    assert_stdout_contains(&output, "credentials written to");

    assert!(t.credentials_file().is_file());
    assert!(t.key_file().is_file());
    assert_output_excludes(&output, PASSWORD);
}

#[test]
#[cfg(unix)]
fn test_create_permissions() {
    let t = Test::created(EMAIL, PASSWORD);

    assert_eq!(mode(&t.secure_dir()), 0o700);
    assert_eq!(mode(&t.credentials_file()), 0o600);
    assert_eq!(mode(&t.key_file()), 0o600);
}

#[test]
fn test_create_with_fields() {
    let t = Test::new();

    let output = t.create_with(
        EMAIL,
        PASSWORD,
        &["--username", "bot", "--field", "region=eu-west-1", "--field", "pin=1=2"],
    );
    assert_success(&output);

    assert_eq!(stdout(&t.get("username")).trim(), "bot");
    assert_eq!(stdout(&t.get("region")).trim(), "eu-west-1");
    assert_eq!(stdout(&t.get("pin")).trim(), "1=2");
}

#[test]
fn test_create_with_key_password() {
    let t = Test::new();

    let output = t.create_with(EMAIL, PASSWORD, &["--key-password", "kp"]);
    assert_success(&output);

    let key = std::fs::read_to_string(t.key_file()).unwrap();
    assert!(key.contains("argon2id"));
    assert!(!key.contains("\"kp\""));

    assert_eq!(stdout(&t.get("email")).trim(), EMAIL);
}

#[test]
fn test_create_from_stdin() {
    let t = Test::new();

    let output = t.create_stdin(
        r#"{"email":"bot@example.com","password":"s3cret-pass","username":"bot","keypass":"","additional_data":{"pin":1234}}"#,
    );
    assert_success(&output);

    assert_eq!(stdout(&t.get("pin")).trim(), "1234");
    assert_eq!(stdout(&t.get("username")).trim(), "bot");
}

#[test]
fn test_create_from_stdin_rejects_garbage() {
    let t = Test::new();

    let output = t.create_stdin("not json");
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid input");
    assert!(!t.credentials_file().exists());
}

#[test]
fn test_create_rejects_blank_password() {
    let t = Test::new();

    let output = t.create(EMAIL, "  ");
    assert_failure(&output);
    assert_stderr_contains(&output, "password");
    assert!(!t.key_file().exists());
}

#[test]
fn test_create_with_custom_paths() {
    let t = Test::new();

    let output = t.create_with(
        EMAIL,
        PASSWORD,
        &["--folder", "vault", "--credentials-file", "work.enc", "--key-file", "work.key"],
    );
    assert_success(&output);

    let dir = t.home.path().join("vault");
    assert!(dir.join("work.enc").is_file());
    assert!(dir.join("work.key").is_file());
    assert!(!t.secure_dir().exists());
}

#[test]
fn test_create_save_as() {
    let t = Test::new();

    let output = t.create_with(
        EMAIL,
        PASSWORD,
        &["--save-as", "bot", "--description", "ci bot"],
    );
    assert_success(&output);
    assert_stdout_contains(&output, "saved as profile");

    let list = t.profile(&["list", "--json"]);
    assert_success(&list);
    let doc = stdout_json(&list);
    assert_eq!(doc["count"], 1);
    assert_eq!(doc["profiles"][0]["name"], "bot");
    assert_eq!(doc["profiles"][0]["description"], "ci bot");
}

#[test]
fn test_description_requires_save_as() {
    let t = Test::new();

    let output = t.create_with(EMAIL, PASSWORD, &["--description", "x"]);
    assert!(!output.status.success());
    assert!(!t.credentials_file().exists());
}
