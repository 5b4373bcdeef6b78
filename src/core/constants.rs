//! Constants used throughout credvault.
//!
//! Centralizes default names, permission modes, and cryptographic sizes.

/// Default credentials folder, created under the base directory.
pub const DEFAULT_FOLDER_NAME: &str = ".credentials";

/// Default encrypted credentials file name.
pub const DEFAULT_CREDENTIALS_NAME: &str = "credentials.enc";

/// Default key file name.
pub const DEFAULT_KEY_NAME: &str = "key.key";

/// Registry directory relative to HOME (~/.credentials_manager).
pub const REGISTRY_DIR: &str = ".credentials_manager";

/// Registry file inside the registry directory.
pub const REGISTRY_FILE: &str = "configs_registry.json";

/// Advisory lock file guarding registry mutations.
pub const REGISTRY_LOCK_FILE: &str = "configs_registry.lock";

/// Overrides the registry directory.
pub const REGISTRY_DIR_ENV: &str = "CREDVAULT_REGISTRY_DIR";

/// Log filter for the binary (tracing `EnvFilter` syntax).
pub const LOG_ENV: &str = "CREDVAULT_LOG";

/// Owner read/write.
pub const SECURE_FILE_MODE: u32 = 0o600;

/// Owner read/write/execute.
pub const SECURE_DIR_MODE: u32 = 0o700;

/// Group/other bits that must be clear on every vault artifact.
pub const INSECURE_MODE_MASK: u32 = 0o077;

/// Symmetric key length (AES-256).
pub const KEY_LEN: usize = 32;

/// Per-profile salt length for password-derived keys.
pub const SALT_LEN: usize = 16;

/// AES-GCM nonce length.
pub const NONCE_LEN: usize = 12;

/// Argon2id memory cost in KiB (OWASP baseline).
pub const KDF_MEMORY_KIB: u32 = 19_456;

/// Argon2id passes.
pub const KDF_ITERATIONS: u32 = 2;

/// Argon2id lanes.
pub const KDF_PARALLELISM: u32 = 1;
