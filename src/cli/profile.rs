//! Profile commands.
//!
//! Register, list, inspect, describe, and remove named profiles.

use crate::cli::{output, resolve, Target};
use crate::core::registry::FileStatus;
use crate::core::vault::ProfileStatus;
use crate::error::Result;

/// Register the current paths under `name`.
pub fn save(target: &Target, name: &str, description: Option<&str>) -> Result<()> {
    let mut vault = resolve::open_vault(target)?;
    let record = vault.save_current_as(name, description)?;

    output::success(&format!(
        "saved profile {} -> {}",
        output::key(&record.name),
        output::path(vault.paths().secure_directory())
    ));
    Ok(())
}

/// List registered profiles.
pub fn list(target: &Target, json: bool) -> Result<()> {
    let registry = resolve::registry(target);
    let profiles = registry.list();

    if json {
        let result = serde_json::json!({
            "profiles": profiles,
            "count": profiles.len(),
        });
        output::data(&serde_json::to_string_pretty(&result)?);
    } else if profiles.is_empty() {
        output::dimmed("no saved profiles");
    } else {
        output::section(&format!("{} profiles", profiles.len()));
        for record in &profiles {
            let dir = record.paths();
            let detail = match &record.description {
                Some(d) => format!("{}  {}", output::path(dir.secure_directory()), d),
                None => output::path(dir.secure_directory()),
            };
            output::kv(&record.name, detail);
        }
    }

    Ok(())
}

/// Unregister a profile.
pub fn rm(target: &Target, name: &str) -> Result<()> {
    let mut registry = resolve::registry(target);
    registry.remove(name)?;
    output::success(&format!("removed profile {}", output::key(name)));
    output::dimmed("files on disk were left in place");
    Ok(())
}

/// Show which artifacts exist for one profile, or for all of them.
pub fn status(target: &Target, name: Option<&str>, all: bool, json: bool) -> Result<()> {
    let vault = resolve::open_vault(target)?;

    if all {
        let statuses = vault.status_all();
        if json {
            output::data(&serde_json::to_string_pretty(&statuses)?);
        } else if statuses.is_empty() {
            output::dimmed("no saved profiles");
        } else {
            for status in &statuses {
                print_status(status);
            }
        }
        return Ok(());
    }

    let probe = vault.status_of(name)?;
    let label = name.or(vault.profile_name());
    if json {
        let result = serde_json::json!({
            "profile": label,
            "registered": probe.registered,
            "files": probe.files,
        });
        output::data(&serde_json::to_string_pretty(&result)?);
    } else {
        output::section(label.unwrap_or("(unsaved profile)"));
        print_files(&probe.files);
    }

    Ok(())
}

/// Set a profile's description.
pub fn describe(target: &Target, name: &str, description: &str) -> Result<()> {
    let mut vault = resolve::open_vault(target)?;
    let description = Some(description).filter(|d| !d.trim().is_empty());
    vault.describe_profile(name, description)?;
    output::success(&format!("updated profile {}", output::key(name)));
    Ok(())
}

fn print_status(status: &ProfileStatus) {
    output::section(&status.record.name);
    if let Some(d) = &status.record.description {
        output::kv("description", d);
    }
    let last_used = status
        .record
        .last_used
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "never".to_string());
    output::kv("last used  ", last_used);
    print_files(&status.files);
}

fn print_files(files: &FileStatus) {
    output::kv("directory  ", output::mark(files.directory_exists));
    output::kv("credentials", output::mark(files.credentials_exists));
    output::kv("key        ", output::mark(files.key_exists));
}
