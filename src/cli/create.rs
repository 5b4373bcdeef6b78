//! Create command.
//!
//! Writes a new key and encrypted credentials file for the selected
//! profile, from arguments or from a JSON document on stdin.

use std::collections::BTreeMap;
use std::io::Read;

use clap::Args;
use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::{output, resolve, Target};
use crate::core::domain::SecretPayload;
use crate::error::{Error, Result};

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Login email
    #[arg(required_unless_present = "stdin")]
    pub email: Option<String>,

    /// Login password
    #[arg(required_unless_present = "stdin")]
    pub password: Option<String>,

    /// Login username
    #[arg(long)]
    pub username: Option<String>,

    /// Additional field, repeatable
    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,

    /// Derive the key from this password instead of generating it
    #[arg(long, conflicts_with = "prompt_key_password")]
    pub key_password: Option<String>,

    /// Prompt for the key password
    #[arg(long)]
    pub prompt_key_password: bool,

    /// Read {"email","password","username","keypass","additional_data"} from stdin
    #[arg(long, conflicts_with_all = ["email", "password", "username", "fields"])]
    pub stdin: bool,

    /// Register the profile under this name afterwards
    #[arg(long, value_name = "NAME")]
    pub save_as: Option<String>,

    /// Description for --save-as
    #[arg(long, requires = "save_as")]
    pub description: Option<String>,
}

/// JSON accepted by `create --stdin`.
#[derive(Deserialize)]
struct CreateRequest {
    email: Option<String>,
    password: Option<String>,
    username: Option<String>,
    keypass: Option<String>,
    #[serde(default)]
    additional_data: BTreeMap<String, serde_json::Value>,
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

/// Create credentials.
pub fn execute(target: &Target, mut args: CreateArgs) -> Result<()> {
    let (payload, mut key_password) = if args.stdin {
        read_request(std::io::stdin().lock())?
    } else {
        (payload_from_args(&mut args), args.key_password.take().map(Zeroizing::new))
    };

    if args.prompt_key_password {
        key_password = Some(prompt_key_password()?);
    }

    let mut vault = resolve::open_vault(target)?;
    vault.create(&payload, key_password.as_deref().map(String::as_str))?;

    output::success(&format!(
        "credentials written to {}",
        output::path(vault.paths().credentials_file())
    ));

    if let Some(name) = args.save_as.as_deref() {
        let record = vault.save_current_as(name, args.description.as_deref())?;
        output::success(&format!("saved as profile {}", output::key(&record.name)));
    }

    Ok(())
}

fn payload_from_args(args: &mut CreateArgs) -> SecretPayload {
    let mut payload = SecretPayload::default();
    payload.email = args.email.take();
    payload.password = args.password.take();
    payload.username = args.username.take();
    payload.additional_data = std::mem::take(&mut args.fields).into_iter().collect();
    payload
}

fn read_request(mut input: impl Read) -> Result<(SecretPayload, Option<Zeroizing<String>>)> {
    let mut raw = Zeroizing::new(String::new());
    input.read_to_string(&mut raw)?;

    let request: CreateRequest = serde_json::from_str(&raw)
        .map_err(|e| Error::InvalidInput(format!("stdin is not a create request: {e}")))?;
    debug!(fields = request.additional_data.len(), "create request parsed");

    let CreateRequest {
        email,
        password,
        username,
        keypass,
        additional_data,
    } = request;

    let mut payload = SecretPayload::default();
    payload.email = email;
    payload.password = password;
    payload.username = username;
    payload.additional_data = additional_data
        .into_iter()
        .map(|(k, v)| match v {
            serde_json::Value::String(s) => (k, s),
            other => (k, other.to_string()),
        })
        .collect();

    Ok((payload, keypass.map(Zeroizing::new)))
}

fn prompt_key_password() -> Result<Zeroizing<String>> {
    dialoguer::Password::new()
        .with_prompt("Key password")
        .with_confirmation("Confirm key password", "passwords do not match")
        .interact()
        .map(Zeroizing::new)
        .map_err(|e| Error::Other(format!("cannot read key password: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("otp=12=3").unwrap(),
            ("otp".to_string(), "12=3".to_string())
        );
        assert_eq!(parse_field("k=").unwrap(), ("k".to_string(), String::new()));
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=v").is_err());
    }

    #[test]
    fn test_read_request() {
        let json = br#"{
            "email": "a@b.c",
            "password": "pw",
            "keypass": "kp",
            "additional_data": {"pin": 1234, "note": "hi"}
        }"#;

        let (payload, keypass) = read_request(&json[..]).unwrap();
        assert_eq!(payload.email.as_deref(), Some("a@b.c"));
        assert!(payload.username.is_none());
        assert_eq!(payload.additional_data["pin"], "1234");
        assert_eq!(payload.additional_data["note"], "hi");
        assert_eq!(keypass.as_deref().map(String::as_str), Some("kp"));
    }

    #[test]
    fn test_read_request_rejects_garbage() {
        let err = read_request(&b"not json"[..]).unwrap_err();
        assert_eq!(err.status(), crate::core::status::Status::InvalidInput);
    }
}
