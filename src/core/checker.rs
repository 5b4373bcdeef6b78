//! Artifact hygiene checks and credential comparison.
//!
//! Checks never fail; every outcome, including I/O trouble, is reported as
//! a [`Status`].

use std::fs;
use std::io;
use std::path::Path;

use subtle::{Choice, ConstantTimeEq};
use tracing::debug;

use crate::core::config::ProfilePaths;
use crate::core::domain::{CheckReport, SecretPayload};
use crate::core::fs::is_owner_only;
use crate::core::status::Status;

/// Status codes for one kind of artifact.
struct ArtifactCodes {
    missing: Status,
    permission: Status,
    io: Status,
    unknown: Status,
}

const DIRECTORY: ArtifactCodes = ArtifactCodes {
    missing: Status::MissingDirectory,
    permission: Status::DirectoryPermission,
    io: Status::DirectoryIo,
    unknown: Status::UnknownDirectory,
};

const CREDENTIALS: ArtifactCodes = ArtifactCodes {
    missing: Status::MissingCredentialsFile,
    permission: Status::CredentialsFilePermission,
    io: Status::CredentialsFileIo,
    unknown: Status::UnknownCredentialsFile,
};

const KEY: ArtifactCodes = ArtifactCodes {
    missing: Status::MissingKeyFile,
    permission: Status::KeyFilePermission,
    io: Status::KeyFileIo,
    unknown: Status::UnknownKeyFile,
};

/// Hygiene checker for one profile.
#[derive(Debug, Clone)]
pub struct Checker {
    paths: ProfilePaths,
}

impl Checker {
    pub fn new(paths: ProfilePaths) -> Self {
        Self { paths }
    }

    /// The secure directory exists and is a directory.
    ///
    /// Its mode is not judged here; the file checks decide whether the
    /// secrets themselves are exposed.
    pub fn check_directory(&self) -> Status {
        match stat(self.paths.secure_directory(), true, &DIRECTORY) {
            Ok(_) => Status::Success,
            Err(status) => status,
        }
    }

    /// The credentials file exists and is owner-only.
    pub fn check_credentials_file(&self) -> Status {
        check_file(self.paths.credentials_file(), &CREDENTIALS)
    }

    /// The key file exists and is owner-only.
    pub fn check_key_file(&self) -> Status {
        check_file(self.paths.key_file(), &KEY)
    }

    /// Run all three checks.
    ///
    /// When the directory check fails the files are not probed and are
    /// reported as `CredentialsNull` and `KeyNull`.
    pub fn report(&self) -> CheckReport {
        let directory = self.check_directory();
        if !directory.is_success() {
            return CheckReport {
                directory,
                credentials: Status::CredentialsNull,
                key: Status::KeyNull,
            };
        }

        CheckReport {
            directory,
            credentials: self.check_credentials_file(),
            key: self.check_key_file(),
        }
    }

    /// Compare `email` and `password` against stored credentials.
    ///
    /// Both comparisons run in constant time and are always evaluated.
    pub fn verify(stored: Option<&SecretPayload>, email: &str, password: &str) -> Status {
        let Some(stored) = stored else {
            return Status::CredentialsNull;
        };

        let email_ok = ct_eq_str(stored.email.as_deref(), email);
        let password_ok = ct_eq_str(stored.password.as_deref(), password);

        if bool::from(email_ok & password_ok) {
            Status::Success
        } else {
            Status::CredentialsInvalid
        }
    }
}

fn ct_eq_str(stored: Option<&str>, candidate: &str) -> Choice {
    let present = Choice::from(u8::from(stored.is_some()));
    present & stored.unwrap_or_default().as_bytes().ct_eq(candidate.as_bytes())
}

fn check_file(path: &Path, codes: &ArtifactCodes) -> Status {
    let meta = match stat(path, false, codes) {
        Ok(meta) => meta,
        Err(status) => return status,
    };

    if !is_owner_only(&meta) {
        debug!(path = %path.display(), "file grants group or other access");
        return codes.permission;
    }

    Status::Success
}

/// Metadata for an artifact of the expected kind.
fn stat(path: &Path, want_dir: bool, codes: &ArtifactCodes) -> Result<fs::Metadata, Status> {
    let meta = fs::metadata(path).map_err(|e| classify_io(&e, codes))?;

    let right_kind = if want_dir { meta.is_dir() } else { meta.is_file() };
    if !right_kind {
        return Err(codes.missing);
    }
    Ok(meta)
}

fn classify_io(err: &io::Error, codes: &ArtifactCodes) -> Status {
    match err.kind() {
        io::ErrorKind::NotFound => codes.missing,
        io::ErrorKind::PermissionDenied => codes.permission,
        _ if err.raw_os_error().is_some() => codes.io,
        _ => codes.unknown,
    }
}
