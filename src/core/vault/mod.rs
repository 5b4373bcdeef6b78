//! The primary interface for credvault operations.
//!
//! A `Vault` is bound to one profile at a time: either an ad-hoc set of
//! paths, or a named profile resolved through the registry. It owns the
//! credential store for those paths and the registry handle.

mod credentials;
mod profiles;

use crate::core::config::{PathOverrides, ProfilePaths};
use crate::core::keys::KdfParams;
use crate::core::registry::Registry;
use crate::core::store::CredentialStore;
use crate::core::types::ProfileName;
use crate::error::Result;

pub use profiles::ProfileStatus;

/// The primary interface for credvault operations.
#[derive(Debug)]
pub struct Vault {
    pub(super) store: CredentialStore,
    pub(super) registry: Registry,
    pub(super) profile: Option<ProfileName>,
    pub(super) kdf_params: Option<KdfParams>,
}

impl Vault {
    /// Open an ad-hoc profile with the default registry.
    pub fn open(overrides: &PathOverrides) -> Self {
        Self::with_registry(Registry::open_default(), overrides)
    }

    /// Open a named profile from the default registry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if `name` is not registered.
    pub fn open_profile(name: &str) -> Result<Self> {
        Self::with_registry_profile(Registry::open_default(), name)
    }

    /// Open an ad-hoc profile with an explicit registry.
    pub fn with_registry(registry: Registry, overrides: &PathOverrides) -> Self {
        Self {
            store: CredentialStore::new(ProfilePaths::resolve(overrides)),
            registry,
            profile: None,
            kdf_params: None,
        }
    }

    /// Open a named profile from an explicit registry.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if `name` is not registered.
    pub fn with_registry_profile(mut registry: Registry, name: &str) -> Result<Self> {
        let paths = registry.lookup(name)?;
        Ok(Self {
            store: CredentialStore::new(paths),
            registry,
            profile: Some(name.trim().to_string()),
            kdf_params: None,
        })
    }

    /// Argon2id parameters for keys created through this vault.
    pub fn with_kdf_params(mut self, params: KdfParams) -> Self {
        self.kdf_params = Some(params);
        self.store = self.store.with_kdf_params(params);
        self
    }

    /// Paths of the active profile.
    pub fn paths(&self) -> &ProfilePaths {
        self.store.paths()
    }

    /// Name of the active profile, if it is registered.
    pub fn profile_name(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Rebind to `paths`, keeping the registry and KDF settings.
    pub(super) fn rebind(&mut self, paths: ProfilePaths, profile: Option<ProfileName>) {
        let mut store = CredentialStore::new(paths);
        if let Some(params) = self.kdf_params {
            store = store.with_kdf_params(params);
        }
        self.store = store;
        self.profile = profile;
    }
}
