//! Check command.
//!
//! Reports directory, credentials file, and key file hygiene as text, JSON,
//! or three packed status codes. Exits 1 when any check fails.

use crate::cli::{output, resolve, Target};
use crate::core::domain::CheckReport;
use crate::core::status::ErrorKind;
use crate::error::Result;

/// Run the checks and print them in the requested format.
pub fn execute(target: &Target, json: bool, binary: bool) -> Result<()> {
    let vault = resolve::open_vault(target)?;
    let report = vault.checker();

    if binary {
        output::bytes(&report.to_bytes())?;
    } else if json {
        output::data(&serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report, vault.paths().secure_directory());
    }

    if !report.is_secure() {
        std::process::exit(1);
    }
    Ok(())
}

fn print_text(report: &CheckReport, dir: &std::path::Path) {
    output::section("Checks");
    output::kv("path", output::path(dir));
    for (name, status) in report.checks() {
        output::kv(
            &format!("{:<11}", name),
            format!("{} {}", output::mark(status.is_success()), status.message()),
        );
    }

    output::blank();
    if report.is_secure() {
        output::success("secure");
    } else {
        output::warn("insecure");
        match report.first_failure().map(|s| s.kind()) {
            Some(ErrorKind::MissingArtifact) => output::hint(&format!(
                "create credentials with {}",
                output::cmd("credvault create EMAIL PASSWORD")
            )),
            Some(ErrorKind::PermissionViolation) => output::hint(&format!(
                "restrict access with {}",
                output::cmd(&format!("chmod -R go-rwx {}", dir.display()))
            )),
            _ => {}
        }
    }
}
