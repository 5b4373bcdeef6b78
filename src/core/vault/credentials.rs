//! Credential operations on the active profile.

use zeroize::Zeroizing;

use super::Vault;
use crate::core::checker::Checker;
use crate::core::domain::{CheckReport, SecretPayload};
use crate::core::status::Status;
use crate::core::store::Unlocked;
use crate::error::Result;

impl Vault {
    /// Create (or replace) the profile's key and credentials file.
    ///
    /// # Errors
    ///
    /// `CredentialError::MissingField` if email or password is blank, then
    /// directory, key, cipher, or credentials-file errors in that order.
    pub fn create(&mut self, payload: &SecretPayload, key_password: Option<&str>) -> Result<()> {
        self.store.create(payload, key_password)
    }

    /// Decrypt the whole payload.
    pub fn load(&mut self) -> Result<SecretPayload> {
        self.store.load()
    }

    /// Decrypt once for several reads.
    pub fn unlock(&mut self) -> Result<Unlocked> {
        self.store.unlock()
    }

    /// Check a login against the stored credentials.
    ///
    /// Returns the load failure status if the payload cannot be read.
    pub fn verify(&mut self, email: &str, password: &str) -> Status {
        match self.store.unlock() {
            Ok(unlocked) => unlocked.verify(email, password),
            Err(e) => e.status(),
        }
    }

    pub fn get_username(&mut self) -> Result<Option<Zeroizing<String>>> {
        self.store.get_username()
    }

    pub fn get_email(&mut self) -> Result<Option<Zeroizing<String>>> {
        self.store.get_email()
    }

    pub fn get_password(&mut self) -> Result<Option<Zeroizing<String>>> {
        self.store.get_password()
    }

    pub fn get_additional_data(&mut self) -> Result<Vec<(String, Zeroizing<String>)>> {
        self.store.get_additional_data()
    }

    /// A standard field or an additional-data key.
    pub fn get_field(&mut self, name: &str) -> Result<Option<Zeroizing<String>>> {
        self.store.get_field(name)
    }

    /// Directory, credentials file, and key file hygiene.
    pub fn checker(&self) -> CheckReport {
        Checker::new(self.paths().clone()).report()
    }
}
