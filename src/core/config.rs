//! Profile path configuration.
//!
//! Resolves the three paths a credential profile uses (secure directory,
//! encrypted credentials file, key file) and creates the directory with
//! owner-only permissions.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use crate::core::constants::{
    DEFAULT_CREDENTIALS_NAME, DEFAULT_FOLDER_NAME, DEFAULT_KEY_NAME, INSECURE_MODE_MASK,
    SECURE_DIR_MODE,
};
use crate::error::DirectoryError;

/// Optional overrides for [`ProfilePaths::resolve`].
///
/// Anything left as `None` falls back to the defaults: the home directory,
/// `.credentials`, `credentials.enc`, and `key.key`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathOverrides {
    pub base_directory: Option<PathBuf>,
    pub folder_name: Option<String>,
    pub credentials_filename: Option<String>,
    pub key_filename: Option<String>,
}

impl PathOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_directory = Some(dir.into());
        self
    }

    pub fn folder_name(mut self, name: impl Into<String>) -> Self {
        self.folder_name = Some(name.into());
        self
    }

    pub fn credentials_filename(mut self, name: impl Into<String>) -> Self {
        self.credentials_filename = Some(name.into());
        self
    }

    pub fn key_filename(mut self, name: impl Into<String>) -> Self {
        self.key_filename = Some(name.into());
        self
    }
}

/// Resolved paths for one credential profile.
///
/// `credentials_file` and `key_file` are always direct children of
/// `secure_directory`. Values are immutable; resolve a new one to change a
/// path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfilePaths {
    secure_directory: PathBuf,
    credentials_file: PathBuf,
    key_file: PathBuf,
}

impl ProfilePaths {
    /// Compose paths from overrides and defaults. Performs no I/O beyond
    /// looking up the home and current directories.
    pub fn resolve(overrides: &PathOverrides) -> Self {
        let base = overrides
            .base_directory
            .clone()
            .unwrap_or_else(default_base_directory);

        Self::from_parts(
            base,
            overrides.folder_name.as_deref().unwrap_or(DEFAULT_FOLDER_NAME),
            overrides
                .credentials_filename
                .as_deref()
                .unwrap_or(DEFAULT_CREDENTIALS_NAME),
            overrides.key_filename.as_deref().unwrap_or(DEFAULT_KEY_NAME),
        )
    }

    /// Compose paths from explicit parts.
    ///
    /// Each name is reduced to a single path component. A name with no
    /// usable component (empty, `.`, `..`) falls back to its default.
    pub fn from_parts(
        base_directory: impl Into<PathBuf>,
        folder_name: &str,
        credentials_filename: &str,
        key_filename: &str,
    ) -> Self {
        let base = absolutize(base_directory.into());
        let secure_directory = base.join(single_component(folder_name, DEFAULT_FOLDER_NAME));
        let credentials_file = secure_directory.join(single_component(
            credentials_filename,
            DEFAULT_CREDENTIALS_NAME,
        ));
        let key_file = secure_directory.join(single_component(key_filename, DEFAULT_KEY_NAME));

        Self {
            secure_directory,
            credentials_file,
            key_file,
        }
    }

    pub fn secure_directory(&self) -> &Path {
        &self.secure_directory
    }

    pub fn credentials_file(&self) -> &Path {
        &self.credentials_file
    }

    pub fn key_file(&self) -> &Path {
        &self.key_file
    }

    /// Directory that contains the secure directory.
    pub fn base_directory(&self) -> &Path {
        self.secure_directory
            .parent()
            .unwrap_or(&self.secure_directory)
    }

    pub fn folder_name(&self) -> String {
        file_name_of(&self.secure_directory)
    }

    pub fn credentials_filename(&self) -> String {
        file_name_of(&self.credentials_file)
    }

    pub fn key_filename(&self) -> String {
        file_name_of(&self.key_file)
    }

    /// Create the secure directory (and missing parents) with mode 0700.
    ///
    /// Idempotent. An existing directory that grants group/other access is
    /// tightened to 0700.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::PermissionDenied` when the OS refuses,
    /// `DirectoryError::NotADirectory` when a file occupies the path, and
    /// `DirectoryError::Io`/`Unknown` for anything else.
    pub fn ensure_directory(&self) -> Result<(), DirectoryError> {
        let dir = &self.secure_directory;

        match fs::metadata(dir) {
            Ok(meta) if meta.is_dir() => {
                tighten_directory(dir, &meta)?;
                return Ok(());
            }
            Ok(_) => return Err(DirectoryError::NotADirectory(dir.clone())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(DirectoryError::from_io(dir, e)),
        }

        debug!(path = %dir.display(), "creating secure directory");
        create_private_dir(dir).map_err(|e| DirectoryError::from_io(dir, e))
    }
}

/// Create `dir` and any missing parents with mode 0700.
pub(crate) fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(SECURE_DIR_MODE);
    }

    builder.create(dir)?;

    // The umask may have cleared bits; set the final directory exactly.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(SECURE_DIR_MODE))?;
    }

    Ok(())
}

fn tighten_directory(dir: &Path, meta: &fs::Metadata) -> Result<(), DirectoryError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let mode = meta.permissions().mode() & 0o777;
        if mode & INSECURE_MODE_MASK != 0 {
            warn!(
                path = %dir.display(),
                mode = %format!("{:o}", mode),
                "tightening insecure directory permissions"
            );
            fs::set_permissions(dir, fs::Permissions::from_mode(SECURE_DIR_MODE))
                .map_err(|e| DirectoryError::from_io(dir, e))?;
        }
    }
    #[cfg(not(unix))]
    let _ = (dir, meta);

    Ok(())
}

fn default_base_directory() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}

fn single_component<'a>(name: &'a str, default: &'a str) -> &'a str {
    match Path::new(name).components().next_back() {
        Some(Component::Normal(part)) => part.to_str().unwrap_or(default),
        _ => default,
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
