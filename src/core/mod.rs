//! Core library components.
//!
//! Path resolution, the profile registry, key management, encryption, and
//! the vault facade that ties them together.

pub mod checker;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod domain;
pub mod fs;
pub mod keys;
pub mod lock;
pub mod registry;
pub mod status;
pub mod store;
pub mod types;
pub mod vault;
