//! Test support utilities for credvault integration tests.
//!
//! Provides isolated environments and helper commands.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::PathBuf;

use tempfile::TempDir;

/// Test environment with an isolated home and registry.
///
/// Child processes get `HOME` and `CREDVAULT_REGISTRY_DIR` pointed into the
/// temp dir, so tests can run in parallel without touching the real home.
pub struct Test {
    pub home: TempDir,
}

impl Test {
    pub fn new() -> Self {
        let home = TempDir::new().expect("failed to create temp home");
        Self { home }
    }

    /// A test environment with credentials already created at the default
    /// location.
    pub fn created(email: &str, password: &str) -> Self {
        let t = Self::new();
        let output = t.create(email, password);
        assert!(
            output.status.success(),
            "failed to create credentials: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        t
    }

    pub fn registry_dir(&self) -> PathBuf {
        self.home.path().join("registry")
    }

    /// Default secure directory under the temp home.
    pub fn secure_dir(&self) -> PathBuf {
        self.home.path().join(".credentials")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.secure_dir().join("credentials.enc")
    }

    pub fn key_file(&self) -> PathBuf {
        self.secure_dir().join("key.key")
    }
}
