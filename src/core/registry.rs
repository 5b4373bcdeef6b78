//! Profile registry.
//!
//! Durable mapping from profile name to [`ProfileRecord`], stored as one
//! JSON document (`configs_registry.json`) in a registry directory that is
//! separate from every profile's own directory.
//!
//! Every mutation takes the registry lock, reloads the file, applies the
//! change, and rewrites the whole document. A failed write restores the
//! previous in-memory state, so memory never diverges from disk. Readers
//! reload the document too; the in-memory copy is only a fallback for when
//! the file cannot be read.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::config::{self, ProfilePaths};
use crate::core::constants::{REGISTRY_DIR, REGISTRY_DIR_ENV, REGISTRY_FILE, REGISTRY_LOCK_FILE};
use crate::core::fs::{is_owner_only, replace_private};
use crate::core::lock::RegistryLock;
use crate::core::types::ProfileName;
use crate::error::RegistryError;

/// A registered profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: ProfileName,
    pub base_directory: PathBuf,
    pub folder_name: String,
    pub credentials_filename: String,
    pub key_filename: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_used: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ProfileRecord {
    fn new(name: &str, paths: &ProfilePaths, description: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            base_directory: paths.base_directory().to_path_buf(),
            folder_name: paths.folder_name(),
            credentials_filename: paths.credentials_filename(),
            key_filename: paths.key_filename(),
            created_at: Utc::now(),
            last_used: None,
            description: description.map(str::to_string),
        }
    }

    /// Paths described by this record.
    pub fn paths(&self) -> ProfilePaths {
        ProfilePaths::from_parts(
            &self.base_directory,
            &self.folder_name,
            &self.credentials_filename,
            &self.key_filename,
        )
    }
}

/// Which of a profile's artifacts exist on disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileStatus {
    pub directory_exists: bool,
    pub credentials_exists: bool,
    pub key_exists: bool,
}

impl FileStatus {
    /// Probe the filesystem. Never fails; unreadable paths count as absent.
    pub fn probe(paths: &ProfilePaths) -> Self {
        Self {
            directory_exists: paths.secure_directory().is_dir(),
            credentials_exists: paths.credentials_file().is_file(),
            key_exists: paths.key_file().is_file(),
        }
    }

    /// All three artifacts are present.
    pub fn is_complete(&self) -> bool {
        self.directory_exists && self.credentials_exists && self.key_exists
    }
}

/// Result of [`Registry::exists_on_disk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileProbe {
    pub registered: bool,
    pub files: FileStatus,
}

/// File-backed profile registry.
#[derive(Debug)]
pub struct Registry {
    dir: PathBuf,
    file: PathBuf,
    lock: RegistryLock,
    profiles: BTreeMap<ProfileName, ProfileRecord>,
}

impl Registry {
    /// Default registry directory: `$CREDVAULT_REGISTRY_DIR`, or
    /// `~/.credentials_manager`.
    pub fn default_dir() -> PathBuf {
        if let Some(dir) = std::env::var_os(REGISTRY_DIR_ENV).filter(|v| !v.is_empty()) {
            return PathBuf::from(dir);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(REGISTRY_DIR)
    }

    /// Open the registry in [`Registry::default_dir`].
    pub fn open_default() -> Self {
        Self::open(Self::default_dir())
    }

    /// Open (or start) a registry in `dir`.
    ///
    /// A missing directory is created with mode 0700; an existing one keeps
    /// its mode. A missing, unreadable, or unparsable registry file yields an
    /// empty registry; problems creating the directory are logged and
    /// surface on the first write.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let file = dir.join(REGISTRY_FILE);
        let lock = RegistryLock::new(dir.join(REGISTRY_LOCK_FILE));

        prepare_dir(&dir);

        let profiles = read_profiles(&file).unwrap_or_else(|e| {
            warn!(error = %e, "starting with an empty registry");
            BTreeMap::new()
        });
        debug!(path = %file.display(), profiles = profiles.len(), "registry loaded");

        Self {
            dir,
            file,
            lock,
            profiles,
        }
    }

    /// Registry directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Registry file path.
    pub fn path(&self) -> &Path {
        &self.file
    }

    /// Register a new profile.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::AlreadyExists` if the name is taken (the
    /// existing entry is left untouched), `RegistryError::InvalidName` for
    /// an empty name, or a write/lock error if persisting fails.
    pub fn register(
        &mut self,
        name: &str,
        paths: &ProfilePaths,
        description: Option<&str>,
    ) -> Result<ProfileRecord, RegistryError> {
        let name = validate_name(name)?;
        let record = ProfileRecord::new(name, paths, description);

        self.mutate(|profiles| {
            if profiles.contains_key(name) {
                return Err(RegistryError::AlreadyExists(name.to_string()));
            }
            profiles.insert(name.to_string(), record.clone());
            Ok(())
        })?;

        debug!(profile = name, "profile registered");
        Ok(record)
    }

    /// Resolve a profile's paths and stamp `last_used`.
    ///
    /// The timestamp write is best-effort: if it fails the lookup still
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if the name is not registered, or
    /// `RegistryError::InvalidName` for a blank name.
    pub fn lookup(&mut self, name: &str) -> Result<ProfilePaths, RegistryError> {
        let name = validate_name(name)?;
        let stamped = self.mutate(|profiles| match profiles.get_mut(name) {
            Some(record) => {
                record.last_used = Some(Utc::now());
                Ok(record.paths())
            }
            None => Err(RegistryError::NotFound(name.to_string())),
        });

        match stamped {
            Err(e @ RegistryError::NotFound(_)) => Err(e),
            Err(e) => {
                warn!(profile = name, error = %e, "failed to record last use");
                self.current()
                    .get(name)
                    .map(ProfileRecord::paths)
                    .ok_or_else(|| RegistryError::NotFound(name.to_string()))
            }
            ok => ok,
        }
    }

    /// Record for a profile without touching `last_used`.
    pub fn get(&self, name: &str) -> Option<ProfileRecord> {
        self.current().get(name.trim()).cloned()
    }

    /// Snapshot of all records, ordered by name.
    pub fn list(&self) -> Vec<ProfileRecord> {
        self.current().values().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.current().contains_key(name.trim())
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    /// Remove a profile. Its files on disk are left alone.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if the name is not registered.
    pub fn remove(&mut self, name: &str) -> Result<(), RegistryError> {
        let name = validate_name(name)?;
        self.mutate(|profiles| {
            profiles
                .remove(name)
                .map(|_| ())
                .ok_or_else(|| RegistryError::NotFound(name.to_string()))
        })?;
        debug!(profile = name, "profile removed");
        Ok(())
    }

    /// Replace a profile's description.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if the name is not registered.
    pub fn set_description(
        &mut self,
        name: &str,
        description: Option<&str>,
    ) -> Result<(), RegistryError> {
        let name = validate_name(name)?;
        self.mutate(|profiles| match profiles.get_mut(name) {
            Some(record) => {
                record.description = description.map(str::to_string);
                Ok(())
            }
            None => Err(RegistryError::NotFound(name.to_string())),
        })
    }

    /// Probe a registered profile's artifacts on disk.
    ///
    /// Reports what exists regardless of whether the files are valid, so
    /// drift between the registry and the filesystem shows up.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::NotFound` if the name is not registered.
    pub fn exists_on_disk(&self, name: &str) -> Result<ProfileProbe, RegistryError> {
        let name = name.trim();
        let profiles = self.current();
        let record = profiles
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

        Ok(ProfileProbe {
            registered: true,
            files: FileStatus::probe(&record.paths()),
        })
    }

    /// Every record with its on-disk status.
    pub fn check_all(&self) -> Vec<(ProfileRecord, FileStatus)> {
        self.current()
            .values()
            .map(|record| (record.clone(), FileStatus::probe(&record.paths())))
            .collect()
    }

    /// Records as currently on disk, or the last known state if the file
    /// cannot be read.
    fn current(&self) -> Cow<'_, BTreeMap<ProfileName, ProfileRecord>> {
        match read_profiles(&self.file) {
            Ok(profiles) => Cow::Owned(profiles),
            Err(e) => {
                warn!(error = %e, "using last known registry state");
                Cow::Borrowed(&self.profiles)
            }
        }
    }

    /// Run one locked read-modify-write cycle.
    fn mutate<T>(
        &mut self,
        apply: impl FnOnce(&mut BTreeMap<ProfileName, ProfileRecord>) -> Result<T, RegistryError>,
    ) -> Result<T, RegistryError> {
        let _guard = self.lock.acquire()?;

        // Pick up writes made by other processes since we last looked. An
        // unreadable file must not be replaced by an empty document.
        self.profiles = read_profiles(&self.file)?;
        let previous = self.profiles.clone();

        let out = apply(&mut self.profiles)?;

        if let Err(e) = self.persist() {
            self.profiles = previous;
            return Err(e);
        }
        Ok(out)
    }

    fn persist(&self) -> Result<(), RegistryError> {
        let contents = serde_json::to_vec_pretty(&self.profiles)?;
        replace_private(&self.file, &contents).map_err(|source| RegistryError::Write {
            path: self.file.clone(),
            source,
        })?;
        debug!(path = %self.file.display(), profiles = self.profiles.len(), "registry saved");
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<&str, RegistryError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RegistryError::InvalidName);
    }
    Ok(trimmed)
}

/// Create the registry directory if absent. An existing directory is never
/// chmodded; a loose one is only reported.
fn prepare_dir(dir: &Path) {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => {
            if !is_owner_only(&meta) {
                warn!(path = %dir.display(), "registry directory grants group or other access");
            }
        }
        Ok(_) => warn!(path = %dir.display(), "registry path is not a directory"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if let Err(e) = config::create_private_dir(dir) {
                warn!(path = %dir.display(), error = %e, "cannot create registry directory");
            }
        }
        Err(e) => warn!(path = %dir.display(), error = %e, "cannot inspect registry directory"),
    }
}

/// Load the registry document.
///
/// A missing file is an empty registry and an unparsable one is logged and
/// treated as empty. Any other read failure is an error.
fn read_profiles(file: &Path) -> Result<BTreeMap<ProfileName, ProfileRecord>, RegistryError> {
    let contents = match fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => {
            return Err(RegistryError::Read {
                path: file.to_path_buf(),
                source,
            })
        }
    };

    match serde_json::from_str::<BTreeMap<ProfileName, ProfileRecord>>(&contents) {
        Ok(mut profiles) => {
            // The map key is authoritative.
            for (name, record) in profiles.iter_mut() {
                if record.name != *name {
                    record.name = name.clone();
                }
            }
            Ok(profiles)
        }
        Err(e) => {
            warn!(path = %file.display(), error = %e, "corrupt registry, starting empty");
            Ok(BTreeMap::new())
        }
    }
}
