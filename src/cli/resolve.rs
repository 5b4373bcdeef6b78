//! Profile resolution for CLI commands.

use crate::cli::Target;
use crate::core::config::PathOverrides;
use crate::core::registry::Registry;
use crate::core::vault::Vault;
use crate::error::Result;

/// Registry selected by `--registry-dir`, else the default location.
pub fn registry(target: &Target) -> Registry {
    match &target.registry_dir {
        Some(dir) => Registry::open(dir),
        None => Registry::open_default(),
    }
}

/// Path overrides from the `--base-dir`/`--folder`/`--*-file` flags.
pub fn overrides(target: &Target) -> PathOverrides {
    PathOverrides {
        base_directory: target.base_dir.clone(),
        folder_name: target.folder.clone(),
        credentials_filename: target.credentials_file.clone(),
        key_filename: target.key_file.clone(),
    }
}

/// Open the vault the flags point at.
///
/// Rules:
/// - `--profile NAME` opens the registered profile; path flags are ignored
/// - otherwise the path flags (or defaults) form an ad-hoc profile
pub fn open_vault(target: &Target) -> Result<Vault> {
    let registry = registry(target);
    match target.profile.as_deref() {
        Some(name) => Vault::with_registry_profile(registry, name),
        None => Ok(Vault::with_registry(registry, &overrides(target))),
    }
}
