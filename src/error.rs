//! Error types.
//!
//! Each component reports its own error enum; [`Error`] wraps them for the
//! vault facade and the CLI. Every error maps onto a [`Status`] so callers
//! can render a stable code and message.
//!
//! Messages name paths and profile names, never key or payload material.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::status::{ErrorKind, Status};

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation that reports a status instead of failing outright
    /// (verification, checks) came back unsuccessful.
    #[error("{}", .0.message())]
    Status(Status),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Status code for this error.
    pub fn status(&self) -> Status {
        match self {
            Error::Directory(e) => e.status(),
            Error::Registry(e) => e.status(),
            Error::Key(e) => e.status(),
            Error::Cipher(e) => e.status(),
            Error::Credential(e) => e.status(),
            Error::InvalidInput(_) => Status::InvalidInput,
            Error::Status(status) => *status,
            Error::Io(_) => Status::IoError,
            Error::Json(_) | Error::Other(_) => Status::Unknown,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.status().kind()
    }
}

/// Secure directory creation errors.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("permission denied on directory: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("i/o error on directory {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unexpected error on directory {}: {reason}", path.display())]
    Unknown { path: PathBuf, reason: String },
}

impl DirectoryError {
    pub(crate) fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ if err.raw_os_error().is_some() => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
            _ => Self::Unknown {
                path: path.to_path_buf(),
                reason: err.to_string(),
            },
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Self::PermissionDenied(_) => Status::DirectoryPermission,
            Self::NotADirectory(_) | Self::Io { .. } => Status::DirectoryIo,
            Self::Unknown { .. } => Status::UnknownDirectory,
        }
    }
}

/// Profile registry errors.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("profile already exists: {0}")]
    AlreadyExists(String),

    #[error("profile not found: {0}")]
    NotFound(String),

    #[error("profile name must not be empty")]
    InvalidName,

    #[error("failed to read registry {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write registry {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize registry: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to lock registry {}: {source}", path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RegistryError {
    pub fn status(&self) -> Status {
        match self {
            Self::AlreadyExists(_) => Status::ConfigAlreadyExists,
            Self::NotFound(_) => Status::ConfigNotFound,
            Self::InvalidName => Status::ConfigInvalid,
            Self::Read { .. } => Status::IoError,
            Self::Write { .. } | Self::Serialize(_) => Status::RegistryWriteFailed,
            Self::Lock { .. } => Status::RegistryLockFailed,
        }
    }
}

/// Key generation, persistence, and loading errors.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("key file not found: {}", .0.display())]
    MissingKeyFile(PathBuf),

    #[error("permission denied on key file: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("i/o error on key file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed key file: {0}")]
    Malformed(String),

    #[error("failed to encode key file: {0}")]
    Encode(String),

    #[error("failed to generate encryption key")]
    GenerationFailed,

    #[error("failed to derive encryption key from password")]
    DerivationFailed,
}

impl KeyError {
    pub(crate) fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::MissingKeyFile(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Self::MissingKeyFile(_) => Status::MissingKeyFile,
            Self::PermissionDenied(_) => Status::KeyFilePermission,
            Self::Io { .. } => Status::KeyFileIo,
            Self::Malformed(_) => Status::KeyLoadFailed,
            Self::Encode(_) => Status::KeySaveFailed,
            Self::GenerationFailed | Self::DerivationFailed => Status::KeyCreateFailed,
        }
    }
}

/// Authenticated encryption errors.
///
/// Decryption failures carry no detail: a wrong key, a modified blob, and
/// an unreadable plaintext all look the same to the caller.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    #[error("encryption failed")]
    EncryptionFailed,

    #[error("decryption failed: wrong key or corrupted data")]
    DecryptionFailed,
}

impl CipherError {
    pub fn status(&self) -> Status {
        match self {
            Self::EncryptionFailed => Status::EncryptionFailed,
            Self::DecryptionFailed => Status::DecryptionFailed,
        }
    }
}

/// Credentials file and payload errors.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("credentials file not found: {}", .0.display())]
    MissingCredentialsFile(PathBuf),

    #[error("permission denied on credentials file: {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("i/o error on credentials file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("required field missing or empty: {0}")]
    MissingField(&'static str),

    #[error("field not found: {0}")]
    FieldNotFound(String),
}

impl CredentialError {
    pub(crate) fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::MissingCredentialsFile(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    pub fn status(&self) -> Status {
        match self {
            Self::MissingCredentialsFile(_) => Status::MissingCredentialsFile,
            Self::PermissionDenied(_) => Status::CredentialsFilePermission,
            Self::Io { .. } => Status::CredentialsFileIo,
            Self::MissingField(_) => Status::InvalidInput,
            Self::FieldNotFound(_) => Status::FieldNotFound,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
