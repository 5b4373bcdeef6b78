//! credvault - encrypted, multi-profile credential vault for automation
//! tooling.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── create        # Create a profile's key and credentials
//! │   ├── show          # Show, get, and verify credentials
//! │   ├── check         # Artifact hygiene (text, JSON, binary)
//! │   ├── profile       # Registry management
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # Profile path resolution
//!     ├── registry      # Named profile registry
//!     ├── lock          # Registry file lock
//!     ├── keys          # Key creation, storage, and sealing
//!     ├── cipher        # AES-256-GCM blob format
//!     ├── checker       # Permission and existence checks
//!     ├── store         # Credentials file reader/writer
//!     ├── status        # Status codes
//!     └── vault/        # Facade over all of the above
//! ```
//!
//! # Example
//!
//! ```no_run
//! use credvault::core::config::PathOverrides;
//! use credvault::core::domain::SecretPayload;
//! use credvault::core::vault::Vault;
//!
//! # fn main() -> credvault::error::Result<()> {
//! let mut vault = Vault::open(&PathOverrides::new());
//! vault.create(&SecretPayload::new("bot@example.com", "s3cret"), None)?;
//! vault.save_current_as("bot", Some("scraper account"))?;
//!
//! let mut vault = Vault::open_profile("bot")?;
//! assert!(vault.verify("bot@example.com", "s3cret").is_success());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;
