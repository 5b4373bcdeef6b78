//! Test fixtures and constants.

use std::path::Path;

use credvault::core::config::PathOverrides;
use credvault::core::domain::SecretPayload;
use credvault::core::keys::KdfParams;
use credvault::core::registry::Registry;
use credvault::core::vault::Vault;

pub const EMAIL: &str = "bot@example.com";
pub const PASSWORD: &str = "s3cret-pass";

/// Cheap Argon2id parameters for library-level tests.
pub const FAST_KDF: KdfParams = KdfParams {
    memory_kib: 1024,
    iterations: 1,
    parallelism: 1,
};

/// The payload used by most scenarios.
pub fn sample_payload() -> SecretPayload {
    SecretPayload::new(EMAIL, PASSWORD)
        .with_username("bot")
        .with_field("otp_seed", "JBSWY3DPEHPK3PXP")
        .with_field("region", "eu-west-1")
}

/// An ad-hoc vault rooted at `base` with its registry in `registry`.
pub fn vault_at(base: &Path, registry: &Path) -> Vault {
    Vault::with_registry(
        Registry::open(registry),
        &PathOverrides::new().base_directory(base),
    )
    .with_kdf_params(FAST_KDF)
}
