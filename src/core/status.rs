//! Status codes.
//!
//! A closed set of outcomes shared by every component. Codes and messages
//! are fixed at compile time; callers that need an integer (the packed
//! binary check output, JSON reports) go through [`Status::code`].

use serde::{Serialize, Serializer};
use std::fmt;

/// Broad category of an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Success,
    /// A required field is missing or empty.
    Validation,
    /// Directory, file, or key is absent.
    MissingArtifact,
    /// Artifact is readable by group/other, or the OS denied access.
    PermissionViolation,
    IoFailure,
    /// Key derivation, encryption, or decryption failed.
    CryptoFailure,
    /// Duplicate profile name.
    RegistryConflict,
    /// Unknown profile name.
    RegistryMiss,
    FieldNotFound,
    Unknown,
}

/// Outcome of a vault operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,

    InvalidInput,
    MissingKeyFile,
    MissingCredentialsFile,
    MissingDirectory,

    EncryptionFailed,
    DecryptionFailed,

    PermissionDenied,
    KeyFilePermission,
    CredentialsFilePermission,
    DirectoryPermission,

    IoError,
    KeyFileIo,
    CredentialsFileIo,
    DirectoryIo,

    KeyNull,
    KeySaveFailed,
    KeyCreateFailed,
    KeyLoadFailed,

    CredentialsInvalid,
    CredentialsNull,
    FieldNotFound,

    ConfigAlreadyExists,
    ConfigNotFound,
    ConfigInvalid,
    RegistryWriteFailed,
    RegistryLockFailed,

    UnknownDirectory,
    UnknownCredentialsFile,
    UnknownKeyFile,
    Unknown,
}

impl Status {
    /// Every status, in code order.
    pub const ALL: [Status; 31] = [
        Status::Success,
        Status::InvalidInput,
        Status::MissingKeyFile,
        Status::MissingCredentialsFile,
        Status::MissingDirectory,
        Status::EncryptionFailed,
        Status::DecryptionFailed,
        Status::PermissionDenied,
        Status::KeyFilePermission,
        Status::CredentialsFilePermission,
        Status::DirectoryPermission,
        Status::IoError,
        Status::KeyFileIo,
        Status::CredentialsFileIo,
        Status::DirectoryIo,
        Status::KeyNull,
        Status::KeySaveFailed,
        Status::KeyCreateFailed,
        Status::KeyLoadFailed,
        Status::CredentialsInvalid,
        Status::CredentialsNull,
        Status::FieldNotFound,
        Status::ConfigAlreadyExists,
        Status::ConfigNotFound,
        Status::ConfigInvalid,
        Status::RegistryWriteFailed,
        Status::RegistryLockFailed,
        Status::UnknownDirectory,
        Status::UnknownCredentialsFile,
        Status::UnknownKeyFile,
        Status::Unknown,
    ];

    /// Numeric code used by machine-readable outputs.
    pub const fn code(self) -> i32 {
        match self {
            Status::Success => 0,
            Status::InvalidInput => 100,
            Status::MissingKeyFile => 101,
            Status::MissingCredentialsFile => 102,
            Status::MissingDirectory => 103,
            Status::EncryptionFailed => 120,
            Status::DecryptionFailed => 122,
            Status::PermissionDenied => 140,
            Status::KeyFilePermission => 141,
            Status::CredentialsFilePermission => 142,
            Status::DirectoryPermission => 143,
            Status::IoError => 150,
            Status::KeyFileIo => 151,
            Status::CredentialsFileIo => 152,
            Status::DirectoryIo => 153,
            Status::KeyNull => 160,
            Status::KeySaveFailed => 161,
            Status::KeyCreateFailed => 162,
            Status::KeyLoadFailed => 164,
            Status::CredentialsInvalid => 170,
            Status::CredentialsNull => 171,
            Status::FieldNotFound => 172,
            Status::ConfigAlreadyExists => 180,
            Status::ConfigNotFound => 181,
            Status::ConfigInvalid => 182,
            Status::RegistryWriteFailed => 183,
            Status::RegistryLockFailed => 184,
            Status::UnknownDirectory => 251,
            Status::UnknownCredentialsFile => 253,
            Status::UnknownKeyFile => 254,
            Status::Unknown => 255,
        }
    }

    /// Human-readable description. Never contains secret material.
    pub const fn message(self) -> &'static str {
        match self {
            Status::Success => "Operation completed successfully.",
            Status::InvalidInput => "A required field is missing or empty.",
            Status::MissingKeyFile => "Key file is missing.",
            Status::MissingCredentialsFile => "Credentials file is missing.",
            Status::MissingDirectory => "Credentials directory is missing.",
            Status::EncryptionFailed => "Error occurred during encryption.",
            Status::DecryptionFailed => "Error occurred during decryption.",
            Status::PermissionDenied => "Permission denied accessing files.",
            Status::KeyFilePermission => {
                "Key file is not restricted to its owner or access was denied."
            }
            Status::CredentialsFilePermission => {
                "Credentials file is not restricted to its owner or access was denied."
            }
            Status::DirectoryPermission => "Permission denied accessing the credentials directory.",
            Status::IoError => "I/O error occurred while accessing files.",
            Status::KeyFileIo => "I/O error occurred while accessing the key file.",
            Status::CredentialsFileIo => "I/O error occurred while accessing the credentials file.",
            Status::DirectoryIo => "I/O error occurred while accessing the credentials directory.",
            Status::KeyNull => "The encryption key is absent or was not checked.",
            Status::KeySaveFailed => "Error occurred while saving the encryption key.",
            Status::KeyCreateFailed => "Error occurred while creating the encryption key.",
            Status::KeyLoadFailed => "Error occurred while loading the encryption key.",
            Status::CredentialsInvalid => "Invalid credentials provided.",
            Status::CredentialsNull => "No stored credentials are available.",
            Status::FieldNotFound => "Field not found in stored credentials.",
            Status::ConfigAlreadyExists => "A profile with this name already exists.",
            Status::ConfigNotFound => "Profile not found.",
            Status::ConfigInvalid => "Invalid profile data.",
            Status::RegistryWriteFailed => "Error occurred while writing the profile registry.",
            Status::RegistryLockFailed => "Could not lock the profile registry.",
            Status::UnknownDirectory => "Unknown error occurred in the credentials directory.",
            Status::UnknownCredentialsFile => {
                "Unknown error occurred while checking the credentials file."
            }
            Status::UnknownKeyFile => "Unknown error occurred while checking the key file.",
            Status::Unknown => "Unknown error occurred.",
        }
    }

    /// Category of this status.
    pub const fn kind(self) -> ErrorKind {
        match self {
            Status::Success => ErrorKind::Success,
            Status::InvalidInput | Status::ConfigInvalid | Status::CredentialsInvalid => {
                ErrorKind::Validation
            }
            Status::MissingKeyFile
            | Status::MissingCredentialsFile
            | Status::MissingDirectory
            | Status::KeyNull
            | Status::CredentialsNull => ErrorKind::MissingArtifact,
            Status::PermissionDenied
            | Status::KeyFilePermission
            | Status::CredentialsFilePermission
            | Status::DirectoryPermission => ErrorKind::PermissionViolation,
            Status::IoError
            | Status::KeyFileIo
            | Status::CredentialsFileIo
            | Status::DirectoryIo
            | Status::KeySaveFailed
            | Status::RegistryWriteFailed
            | Status::RegistryLockFailed => ErrorKind::IoFailure,
            Status::EncryptionFailed
            | Status::DecryptionFailed
            | Status::KeyCreateFailed
            | Status::KeyLoadFailed => ErrorKind::CryptoFailure,
            Status::ConfigAlreadyExists => ErrorKind::RegistryConflict,
            Status::ConfigNotFound => ErrorKind::RegistryMiss,
            Status::FieldNotFound => ErrorKind::FieldNotFound,
            Status::UnknownDirectory
            | Status::UnknownCredentialsFile
            | Status::UnknownKeyFile
            | Status::Unknown => ErrorKind::Unknown,
        }
    }

    pub const fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Reverse lookup of [`Status::code`].
    pub fn from_code(code: i32) -> Option<Status> {
        Self::ALL.iter().copied().find(|s| s.code() == code)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl Serialize for Status {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}
