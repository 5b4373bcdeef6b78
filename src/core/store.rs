//! Credential store.
//!
//! Writes and reads one profile's encrypted credentials file:
//! create = ensure directory, create key, save key, encrypt, write;
//! load = read ciphertext, load key, decrypt.

use std::collections::BTreeMap;
use std::fs;

use tracing::debug;
use zeroize::Zeroizing;

use crate::core::checker::Checker;
use crate::core::config::ProfilePaths;
use crate::core::domain::SecretPayload;
use crate::core::fs::write_private;
use crate::core::keys::{KdfParams, KeyManager};
use crate::core::status::Status;
use crate::error::{CredentialError, Result};

/// Reader/writer for one profile's credentials.
#[derive(Debug)]
pub struct CredentialStore {
    paths: ProfilePaths,
    keys: KeyManager,
}

impl CredentialStore {
    pub fn new(paths: ProfilePaths) -> Self {
        let keys = KeyManager::new(paths.key_file());
        Self { paths, keys }
    }

    /// Use non-default Argon2id parameters when creating password keys.
    pub fn with_kdf_params(mut self, params: KdfParams) -> Self {
        self.keys = self.keys.with_kdf_params(params);
        self
    }

    pub fn paths(&self) -> &ProfilePaths {
        &self.paths
    }

    pub fn keys(&mut self) -> &mut KeyManager {
        &mut self.keys
    }

    /// Seal `payload` into a fresh credentials file under a new key.
    ///
    /// Steps run in order and the first failure aborts. A key written before
    /// a later failure is left in place; the next successful `create`
    /// replaces it.
    ///
    /// # Errors
    ///
    /// `CredentialError::MissingField` for a payload without email or
    /// password, then whatever the failing step reports.
    pub fn create(&mut self, payload: &SecretPayload, key_password: Option<&str>) -> Result<()> {
        payload.validate()?;
        self.paths.ensure_directory()?;

        let key = self.keys.create_key(key_password)?;
        self.keys.save_key(key)?;

        let blob = self.keys.encrypt(payload)?;
        let path = self.paths.credentials_file();
        write_private(path, &blob).map_err(|e| CredentialError::from_io(path, e))?;

        debug!(path = %path.display(), bytes = blob.len(), "credentials written");
        Ok(())
    }

    /// Decrypt the credentials file.
    ///
    /// # Errors
    ///
    /// `CredentialError::MissingCredentialsFile` and friends for the
    /// ciphertext read, then key errors, then `CipherError::DecryptionFailed`.
    pub fn load(&mut self) -> Result<SecretPayload> {
        let path = self.paths.credentials_file();
        let blob = fs::read(path).map_err(|e| CredentialError::from_io(path, e))?;
        let payload = self.keys.decrypt(&blob)?;

        debug!(path = %path.display(), "credentials loaded");
        Ok(payload)
    }

    /// Decrypt once and hold the plaintext for several reads.
    pub fn unlock(&mut self) -> Result<Unlocked> {
        Ok(Unlocked {
            payload: self.load()?,
        })
    }

    pub fn get_username(&mut self) -> Result<Option<Zeroizing<String>>> {
        Ok(self.unlock()?.username().map(owned))
    }

    pub fn get_email(&mut self) -> Result<Option<Zeroizing<String>>> {
        Ok(self.unlock()?.email().map(owned))
    }

    pub fn get_password(&mut self) -> Result<Option<Zeroizing<String>>> {
        Ok(self.unlock()?.password().map(owned))
    }

    /// Additional fields, ordered by name.
    pub fn get_additional_data(&mut self) -> Result<Vec<(String, Zeroizing<String>)>> {
        let unlocked = self.unlock()?;
        Ok(unlocked
            .additional_data()
            .iter()
            .map(|(k, v)| (k.clone(), owned(v)))
            .collect())
    }

    /// A standard field or an additional-data key.
    ///
    /// # Errors
    ///
    /// `CredentialError::FieldNotFound` if `name` names neither.
    pub fn get_field(&mut self, name: &str) -> Result<Option<Zeroizing<String>>> {
        let unlocked = self.unlock()?;
        Ok(unlocked.field(name)?.map(owned))
    }
}

fn owned(value: &str) -> Zeroizing<String> {
    Zeroizing::new(value.to_string())
}

/// Decrypted credentials held in memory; wiped on drop.
#[derive(Debug)]
pub struct Unlocked {
    payload: SecretPayload,
}

impl Unlocked {
    pub fn username(&self) -> Option<&str> {
        self.payload.username.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.payload.email.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.payload.password.as_deref()
    }

    pub fn additional_data(&self) -> &BTreeMap<String, String> {
        &self.payload.additional_data
    }

    pub fn field(&self, name: &str) -> std::result::Result<Option<&str>, CredentialError> {
        self.payload.field(name)
    }

    pub fn verify(&self, email: &str, password: &str) -> Status {
        Checker::verify(Some(&self.payload), email, password)
    }

    pub fn payload(&self) -> &SecretPayload {
        &self.payload
    }
}
