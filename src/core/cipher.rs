//! AES-256-GCM sealing for credential blobs.
//!
//! Blob format: `version (1 byte) || nonce (12 bytes) || ciphertext+tag`.
//! The version byte is passed as associated data, so changing any byte of
//! the blob makes [`open`] fail.

use aes_gcm::aead::{Aead, KeyInit, OsRng, Payload};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use zeroize::Zeroizing;

use crate::core::constants::{KEY_LEN, NONCE_LEN};
use crate::core::types::CiphertextBlob;
use crate::error::CipherError;

/// Current blob format version.
pub const BLOB_VERSION: u8 = 0x01;

const HEADER_LEN: usize = 1 + NONCE_LEN;

/// Encrypt `plaintext` under `key` with a fresh random nonce.
pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<CiphertextBlob, CipherError> {
    let cipher = Aes256Gcm::new(key.into());
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
    let aad = [BLOB_VERSION];

    let ciphertext = cipher
        .encrypt(
            &nonce,
            Payload {
                msg: plaintext,
                aad: &aad,
            },
        )
        .map_err(|_| CipherError::EncryptionFailed)?;

    let mut blob = Vec::with_capacity(HEADER_LEN + ciphertext.len());
    blob.push(BLOB_VERSION);
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypt a blob produced by [`seal`].
///
/// Wrong key, truncated input, unknown version, and tag mismatch all return
/// the same `CipherError::DecryptionFailed`.
pub fn open(key: &[u8; KEY_LEN], blob: &[u8]) -> Result<Zeroizing<Vec<u8>>, CipherError> {
    if blob.len() < HEADER_LEN || blob[0] != BLOB_VERSION {
        return Err(CipherError::DecryptionFailed);
    }

    let (header, ciphertext) = blob.split_at(HEADER_LEN);
    let nonce = Nonce::from_slice(&header[1..]);
    let cipher = Aes256Gcm::new(key.into());

    cipher
        .decrypt(
            nonce,
            Payload {
                msg: ciphertext,
                aad: &header[..1],
            },
        )
        .map(Zeroizing::new)
        .map_err(|_| CipherError::DecryptionFailed)
}
