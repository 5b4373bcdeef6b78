//! Key generation and storage.
//!
//! A profile's key is either 32 random bytes or derived from a password
//! with Argon2id and a random per-profile salt. It is persisted as a small
//! TOML document (mode 0600) next to the credentials file:
//!
//! ```toml
//! version = 1
//! kdf = "argon2id"
//! salt = "<base64>"
//! key = "<base64>"
//! memory_kib = 19456
//! iterations = 2
//! parallelism = 1
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use aes_gcm::aead::rand_core::RngCore;
use aes_gcm::aead::OsRng;
use argon2::{Algorithm, Argon2, Params, Version};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::core::cipher;
use crate::core::constants::{
    KDF_ITERATIONS, KDF_MEMORY_KIB, KDF_PARALLELISM, KEY_LEN, SALT_LEN,
};
use crate::core::domain::SecretPayload;
use crate::core::fs::{is_owner_only, mode_of, write_private};
use crate::core::types::CiphertextBlob;
use crate::error::{CipherError, KeyError, Result};

const KEY_FILE_VERSION: u32 = 1;

/// How a key was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KdfKind {
    Random,
    Argon2id,
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: KDF_MEMORY_KIB,
            iterations: KDF_ITERATIONS,
            parallelism: KDF_PARALLELISM,
        }
    }
}

/// A symmetric encryption key.
///
/// Key bytes are wiped on drop and never appear in `Debug` output.
#[derive(Clone)]
pub struct Key {
    bytes: Zeroizing<[u8; KEY_LEN]>,
    kdf: KdfKind,
    salt: Option<[u8; SALT_LEN]>,
    params: Option<KdfParams>,
}

impl Key {
    /// 32 bytes from the OS CSPRNG.
    pub fn generate() -> std::result::Result<Self, KeyError> {
        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        OsRng
            .try_fill_bytes(&mut bytes[..])
            .map_err(|_| KeyError::GenerationFailed)?;

        Ok(Self {
            bytes,
            kdf: KdfKind::Random,
            salt: None,
            params: None,
        })
    }

    /// Derive from `password` with a fresh random salt.
    pub fn derive(password: &str, params: KdfParams) -> std::result::Result<Self, KeyError> {
        let mut salt = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|_| KeyError::GenerationFailed)?;
        Self::derive_with_salt(password, salt, params)
    }

    /// Derive from `password` with a known salt.
    pub fn derive_with_salt(
        password: &str,
        salt: [u8; SALT_LEN],
        params: KdfParams,
    ) -> std::result::Result<Self, KeyError> {
        let argon_params = Params::new(
            params.memory_kib,
            params.iterations,
            params.parallelism,
            Some(KEY_LEN),
        )
        .map_err(|_| KeyError::DerivationFailed)?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon_params);

        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        argon2
            .hash_password_into(password.as_bytes(), &salt, &mut bytes[..])
            .map_err(|_| KeyError::DerivationFailed)?;

        Ok(Self {
            bytes,
            kdf: KdfKind::Argon2id,
            salt: Some(salt),
            params: Some(params),
        })
    }

    pub fn kdf(&self) -> KdfKind {
        self.kdf
    }

    pub fn salt(&self) -> Option<&[u8; SALT_LEN]> {
        self.salt.as_ref()
    }

    pub fn params(&self) -> Option<KdfParams> {
        self.params
    }

    pub(crate) fn bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("bytes", &"<redacted>")
            .field("kdf", &self.kdf)
            .field("params", &self.params)
            .finish()
    }
}

/// On-disk key document.
#[derive(Serialize, Deserialize)]
struct KeyFile {
    version: u32,
    kdf: KdfKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    salt: Option<String>,
    key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    memory_kib: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iterations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parallelism: Option<u32>,
}

impl Drop for KeyFile {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl KeyFile {
    fn from_key(key: &Key) -> Self {
        Self {
            version: KEY_FILE_VERSION,
            kdf: key.kdf,
            salt: key.salt.map(|s| STANDARD.encode(s)),
            key: STANDARD.encode(&key.bytes[..]),
            memory_kib: key.params.map(|p| p.memory_kib),
            iterations: key.params.map(|p| p.iterations),
            parallelism: key.params.map(|p| p.parallelism),
        }
    }

    fn to_key(&self) -> std::result::Result<Key, KeyError> {
        if self.version != KEY_FILE_VERSION {
            return Err(KeyError::Malformed(format!(
                "unsupported key file version {}",
                self.version
            )));
        }

        let decoded = Zeroizing::new(
            STANDARD
                .decode(self.key.trim())
                .map_err(|_| KeyError::Malformed("key is not valid base64".into()))?,
        );
        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        if decoded.len() != KEY_LEN {
            return Err(KeyError::Malformed(format!(
                "key must be {KEY_LEN} bytes, found {}",
                decoded.len()
            )));
        }
        bytes.copy_from_slice(&decoded);

        let (salt, params) = match self.kdf {
            KdfKind::Random => (None, None),
            KdfKind::Argon2id => (Some(self.decode_salt()?), Some(self.decode_params()?)),
        };

        Ok(Key {
            bytes,
            kdf: self.kdf,
            salt,
            params,
        })
    }

    fn decode_salt(&self) -> std::result::Result<[u8; SALT_LEN], KeyError> {
        let encoded = self
            .salt
            .as_deref()
            .ok_or_else(|| KeyError::Malformed("argon2id key without salt".into()))?;
        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| KeyError::Malformed("salt is not valid base64".into()))?;
        decoded
            .try_into()
            .map_err(|_| KeyError::Malformed(format!("salt must be {SALT_LEN} bytes")))
    }

    fn decode_params(&self) -> std::result::Result<KdfParams, KeyError> {
        match (self.memory_kib, self.iterations, self.parallelism) {
            (Some(memory_kib), Some(iterations), Some(parallelism)) => Ok(KdfParams {
                memory_kib,
                iterations,
                parallelism,
            }),
            _ => Err(KeyError::Malformed("argon2id key without parameters".into())),
        }
    }
}

/// Creates, persists, and loads one profile's key, and seals payloads
/// with it.
///
/// The key is read from disk at most once per manager.
#[derive(Debug)]
pub struct KeyManager {
    key_file: PathBuf,
    params: KdfParams,
    cached: Option<Key>,
}

impl KeyManager {
    pub fn new(key_file: impl Into<PathBuf>) -> Self {
        Self {
            key_file: key_file.into(),
            params: KdfParams::default(),
            cached: None,
        }
    }

    /// Use non-default Argon2id parameters for keys created by this manager.
    pub fn with_kdf_params(mut self, params: KdfParams) -> Self {
        self.params = params;
        self
    }

    pub fn key_file(&self) -> &Path {
        &self.key_file
    }

    /// Produce a new key.
    ///
    /// With no password (or an empty one) the key is random; otherwise it is
    /// derived with Argon2id under a fresh salt.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::GenerationFailed` if the OS RNG fails, or
    /// `KeyError::DerivationFailed` if Argon2id rejects its inputs.
    pub fn create_key(&self, password: Option<&str>) -> std::result::Result<Key, KeyError> {
        match password.filter(|p| !p.is_empty()) {
            Some(password) => {
                debug!(memory_kib = self.params.memory_kib, "deriving key from password");
                Key::derive(password, self.params)
            }
            None => {
                debug!("generating random key");
                Key::generate()
            }
        }
    }

    /// Write `key` to the key file with mode 0600 and cache it.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::PermissionDenied` or `KeyError::Io` if the write
    /// fails.
    pub fn save_key(&mut self, key: Key) -> std::result::Result<(), KeyError> {
        let document = KeyFile::from_key(&key);
        let mut contents =
            toml::to_string(&document).map_err(|e| KeyError::Encode(e.to_string()))?;

        let written = write_private(&self.key_file, contents.as_bytes());
        contents.zeroize();
        written.map_err(|e| KeyError::from_io(&self.key_file, e))?;

        debug!(path = %self.key_file.display(), kdf = ?key.kdf, "key saved");
        self.cached = Some(key);
        Ok(())
    }

    /// The profile's key, read from disk on first use.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::MissingKeyFile`, `KeyError::PermissionDenied`, or
    /// `KeyError::Io` when the file cannot be read, and `KeyError::Malformed`
    /// when its contents are not a valid key document.
    pub fn load_key(&mut self) -> std::result::Result<&Key, KeyError> {
        let key = match self.cached.take() {
            Some(key) => key,
            None => read_key_file(&self.key_file)?,
        };
        Ok(self.cached.insert(key))
    }

    /// Check `password` against a password-derived key.
    ///
    /// Re-derives with the stored salt and parameters and compares in
    /// constant time. Random keys never match.
    ///
    /// # Errors
    ///
    /// Propagates [`KeyManager::load_key`] and derivation errors.
    pub fn verify_password(&mut self, password: &str) -> std::result::Result<bool, KeyError> {
        let stored = self.load_key()?;
        let (salt, params) = match (stored.kdf, stored.salt, stored.params) {
            (KdfKind::Argon2id, Some(salt), Some(params)) => (salt, params),
            _ => return Ok(false),
        };
        let stored_bytes = Zeroizing::new(*stored.bytes);

        let candidate = Key::derive_with_salt(password, salt, params)?;
        Ok(candidate.bytes[..].ct_eq(&stored_bytes[..]).into())
    }

    /// Serialize and seal a payload under the profile key.
    ///
    /// # Errors
    ///
    /// Returns a key error if the key cannot be loaded, or
    /// `CipherError::EncryptionFailed`.
    pub fn encrypt(&mut self, payload: &SecretPayload) -> Result<CiphertextBlob> {
        let key = self.load_key()?;
        let plaintext = Zeroizing::new(
            payload
                .to_json()
                .map_err(|_| CipherError::EncryptionFailed)?,
        );
        Ok(cipher::seal(key.bytes(), &plaintext)?)
    }

    /// Open and deserialize a sealed payload.
    ///
    /// # Errors
    ///
    /// Returns a key error if the key cannot be loaded, or
    /// `CipherError::DecryptionFailed` for a wrong key, a modified blob, or
    /// a plaintext that is not a payload document.
    pub fn decrypt(&mut self, blob: &[u8]) -> Result<SecretPayload> {
        let key = self.load_key()?;
        let plaintext = cipher::open(key.bytes(), blob)?;
        let payload =
            SecretPayload::from_json(&plaintext).map_err(|_| CipherError::DecryptionFailed)?;
        Ok(payload)
    }
}

fn read_key_file(path: &Path) -> std::result::Result<Key, KeyError> {
    let meta = fs::metadata(path).map_err(|e| KeyError::from_io(path, e))?;
    if !is_owner_only(&meta) {
        warn!(
            path = %path.display(),
            mode = %format!("{:o}", mode_of(&meta).unwrap_or_default()),
            "key file is readable by group or others"
        );
    }

    let contents =
        Zeroizing::new(fs::read_to_string(path).map_err(|e| KeyError::from_io(path, e))?);
    let document: KeyFile =
        toml::from_str(&contents).map_err(|e| KeyError::Malformed(e.message().to_string()))?;
    let key = document.to_key()?;

    debug!(path = %path.display(), kdf = ?key.kdf, "key loaded");
    Ok(key)
}
