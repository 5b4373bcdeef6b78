//! Hygiene check report.

use serde::{Serialize, Serializer};

use crate::core::status::Status;

/// Outcome of the three artifact checks for one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckReport {
    pub directory: Status,
    pub credentials: Status,
    pub key: Status,
}

#[derive(Serialize)]
struct CheckEntry {
    name: &'static str,
    code: i32,
    message: &'static str,
}

#[derive(Serialize)]
struct CheckDocument {
    checks: Vec<CheckEntry>,
    overall_status: &'static str,
}

impl CheckReport {
    /// Named checks in reporting order.
    pub fn checks(&self) -> [(&'static str, Status); 3] {
        [
            ("directory", self.directory),
            ("credentials", self.credentials),
            ("key", self.key),
        ]
    }

    /// Every check passed.
    pub fn is_secure(&self) -> bool {
        self.checks().iter().all(|(_, s)| s.is_success())
    }

    /// First failing status, if any.
    pub fn first_failure(&self) -> Option<Status> {
        self.checks()
            .into_iter()
            .map(|(_, s)| s)
            .find(|s| !s.is_success())
    }

    /// Three native-endian `i32` codes: directory, credentials, key.
    pub fn to_bytes(&self) -> [u8; 12] {
        let mut out = [0u8; 12];
        for (chunk, (_, status)) in out.chunks_exact_mut(4).zip(self.checks()) {
            chunk.copy_from_slice(&status.code().to_ne_bytes());
        }
        out
    }
}

impl Serialize for CheckReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CheckDocument {
            checks: self
                .checks()
                .into_iter()
                .map(|(name, status)| CheckEntry {
                    name,
                    code: status.code(),
                    message: status.message(),
                })
                .collect(),
            overall_status: if self.is_secure() { "secure" } else { "insecure" },
        }
        .serialize(serializer)
    }
}
