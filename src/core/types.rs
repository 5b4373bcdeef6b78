//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A registered profile name (e.g., `work`, `ci-bot`).
///
/// Unique within the registry and never empty.
pub type ProfileName = String;

/// A credential field name (`email`, `password`, or an additional-data key).
pub type FieldName = String;

/// Raw encrypted credentials as stored on disk.
pub type CiphertextBlob = Vec<u8>;
