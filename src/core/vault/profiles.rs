//! Registry operations through the vault.

use serde::Serialize;

use super::Vault;
use crate::core::registry::{FileStatus, ProfileProbe, ProfileRecord};
use crate::error::Result;

/// A registered profile with its on-disk status.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileStatus {
    #[serde(flatten)]
    pub record: ProfileRecord,
    pub files: FileStatus,
}

impl Vault {
    /// Register the active paths under `name` and make it the active
    /// profile.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::AlreadyExists` if the name is taken.
    pub fn save_current_as(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Result<ProfileRecord> {
        let record = self
            .registry
            .register(name, self.store.paths(), description)?;
        self.profile = Some(record.name.clone());
        Ok(record)
    }

    /// Rebind the vault to a registered profile.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if `name` is not registered; the
    /// vault keeps its current binding.
    pub fn switch_to(&mut self, name: &str) -> Result<()> {
        let paths = self.registry.lookup(name)?;
        self.rebind(paths, Some(name.trim().to_string()));
        Ok(())
    }

    pub fn list_profiles(&self) -> Vec<ProfileRecord> {
        self.registry.list()
    }

    /// On-disk status of `name`, or of the active profile when `None`.
    ///
    /// An unregistered active profile is probed directly and reported with
    /// `registered == false`.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` for an unknown name.
    pub fn status_of(&self, name: Option<&str>) -> Result<ProfileProbe> {
        match name.or(self.profile.as_deref()) {
            Some(name) => Ok(self.registry.exists_on_disk(name)?),
            None => Ok(ProfileProbe {
                registered: false,
                files: FileStatus::probe(self.store.paths()),
            }),
        }
    }

    /// Every registered profile with its on-disk status.
    pub fn status_all(&self) -> Vec<ProfileStatus> {
        self.registry
            .check_all()
            .into_iter()
            .map(|(record, files)| ProfileStatus { record, files })
            .collect()
    }

    /// Unregister `name`. Files on disk are untouched; if it was the active
    /// profile the vault keeps its paths as an ad-hoc profile.
    pub fn remove_profile(&mut self, name: &str) -> Result<()> {
        self.registry.remove(name)?;
        if self.profile.as_deref() == Some(name) {
            self.profile = None;
        }
        Ok(())
    }

    /// Replace the description of a registered profile.
    pub fn describe_profile(&mut self, name: &str, description: Option<&str>) -> Result<()> {
        Ok(self.registry.set_description(name, description)?)
    }
}
