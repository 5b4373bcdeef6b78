//! Read commands: show, get, verify.

use serde_json::json;

use crate::cli::{output, resolve, Target};
use crate::error::{Error, Result};

const MASK: &str = "********";

/// Show decrypted credentials.
pub fn show(target: &Target, json: bool, reveal: bool) -> Result<()> {
    let mut vault = resolve::open_vault(target)?;
    let unlocked = vault.unlock()?;
    let password = unlocked.password().map(|p| if reveal { p } else { MASK });

    if json {
        let doc = json!({
            "profile": vault.profile_name(),
            "username": unlocked.username(),
            "email": unlocked.email(),
            "password": password,
            "additional_data": unlocked.additional_data(),
        });
        output::data(&serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    let title = match vault.profile_name() {
        Some(name) => format!("Credentials ({})", name),
        None => "Credentials".to_string(),
    };
    output::section(&title);
    output::kv("username", unlocked.username().unwrap_or("-"));
    output::kv("email   ", unlocked.email().unwrap_or("-"));
    output::kv("password", password.unwrap_or("-"));

    let extra = unlocked.additional_data();
    if !extra.is_empty() {
        output::section("Additional data");
        for (key, value) in extra {
            output::kv(key, value);
        }
    }

    if !reveal && unlocked.password().is_some() {
        output::blank();
        output::dimmed("password masked; pass --reveal to print it");
    }

    Ok(())
}

/// Print a single field, undecorated.
pub fn get(target: &Target, field: &str) -> Result<()> {
    let mut vault = resolve::open_vault(target)?;
    if let Some(value) = vault.get_field(field)? {
        output::data(&value);
    }
    Ok(())
}

/// Check a login against the stored credentials.
pub fn verify(target: &Target, email: &str, password: &str) -> Result<()> {
    let mut vault = resolve::open_vault(target)?;
    let status = vault.verify(email, password);

    if status.is_success() {
        output::success("credentials match");
        Ok(())
    } else {
        Err(Error::Status(status))
    }
}
