//! Secret payload.
//!
//! The plaintext document sealed into the credentials file.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::core::types::FieldName;
use crate::error::CredentialError;

/// Decrypted credentials.
///
/// Field order is fixed and `additional_data` is a `BTreeMap`, so the
/// serialized form is deterministic. Values are wiped when the payload is
/// dropped.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretPayload {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub additional_data: BTreeMap<FieldName, String>,
}

impl SecretPayload {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: None,
            email: Some(email.into()),
            password: Some(password.into()),
            additional_data: BTreeMap::new(),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_data.insert(key.into(), value.into());
        self
    }

    /// Email and password must be present and not blank.
    pub fn validate(&self) -> Result<(), CredentialError> {
        if is_blank(self.email.as_deref()) {
            return Err(CredentialError::MissingField("email"));
        }
        if is_blank(self.password.as_deref()) {
            return Err(CredentialError::MissingField("password"));
        }
        Ok(())
    }

    /// Look up a field by name.
    ///
    /// Standard names take precedence over `additional_data` keys. A
    /// standard field stored as null resolves to `Ok(None)`.
    pub fn field(&self, name: &str) -> Result<Option<&str>, CredentialError> {
        match name {
            "username" => Ok(self.username.as_deref()),
            "email" => Ok(self.email.as_deref()),
            "password" => Ok(self.password.as_deref()),
            other => self
                .additional_data
                .get(other)
                .map(|v| Some(v.as_str()))
                .ok_or_else(|| CredentialError::FieldNotFound(other.to_string())),
        }
    }

    /// Serialize to JSON bytes for sealing.
    pub(crate) fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub(crate) fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

impl Zeroize for SecretPayload {
    fn zeroize(&mut self) {
        self.username.zeroize();
        self.email.zeroize();
        self.password.zeroize();
        for (mut key, mut value) in std::mem::take(&mut self.additional_data) {
            key.zeroize();
            value.zeroize();
        }
    }
}

impl Drop for SecretPayload {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl fmt::Debug for SecretPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("SecretPayload")
            .field("username", &redact(&self.username))
            .field("email", &redact(&self.email))
            .field("password", &redact(&self.password))
            .field(
                "additional_data",
                &self.additional_data.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}
