//! # Password-Based Authenticated Encryption
//!
//! Used by the wallet to seal the identity list at rest. Two layers:
//!
//! 1. **Argon2id** turns `(password, salt)` into a 256-bit key. Memory-hard,
//!    so brute-forcing a stolen wallet file costs real RAM per guess.
//! 2. **AES-256-GCM** encrypts and authenticates the plaintext under that
//!    key. A wrong password produces a wrong key, and a wrong key fails the
//!    GCM tag check. You get an error, never garbage.
//!
//! ## Wire format
//!
//! [`encrypt`] returns `nonce || ciphertext` as a single `Vec<u8>`. The
//! first 12 bytes are a random nonce, the rest is ciphertext plus the
//! 16-byte tag. [`decrypt`] expects the same layout.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::config::{
    AES_KEY_LENGTH, AES_NONCE_LENGTH, AES_TAG_LENGTH, ARGON2_ITERATIONS, ARGON2_MEMORY_KIB,
    ARGON2_PARALLELISM, WALLET_SALT_LENGTH,
};

/// Errors that can occur during key derivation, encryption, or decryption.
///
/// Kept deliberately vague. "Wrong password" and "corrupted file" look the
/// same from here, and that's the point.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncryptionError {
    #[error("key derivation failed")]
    KeyDerivationFailed,

    #[error("encryption failed")]
    EncryptFailed,

    #[error("decryption failed -- wrong password or corrupted ciphertext")]
    DecryptFailed,

    #[error("ciphertext too short: must hold a nonce and an authentication tag")]
    CiphertextTooShort,
}

/// Generate a fresh random salt for [`derive_key`].
pub fn random_salt() -> [u8; WALLET_SALT_LENGTH] {
    let mut salt = [0u8; WALLET_SALT_LENGTH];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}

/// Derive a 32-byte key from a password and salt with Argon2id.
///
/// The returned key is zeroized when dropped.
pub fn derive_key(
    password: &str,
    salt: &[u8],
) -> Result<Zeroizing<[u8; AES_KEY_LENGTH]>, EncryptionError> {
    let params = Params::new(
        ARGON2_MEMORY_KIB,
        ARGON2_ITERATIONS,
        ARGON2_PARALLELISM,
        Some(AES_KEY_LENGTH),
    )
    .map_err(|_| EncryptionError::KeyDerivationFailed)?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = Zeroizing::new([0u8; AES_KEY_LENGTH]);
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key[..])
        .map_err(|_| EncryptionError::KeyDerivationFailed)?;
    Ok(key)
}

/// Encrypt plaintext with AES-256-GCM using a random nonce.
///
/// Returns `nonce || ciphertext`.
pub fn encrypt(key: &[u8; AES_KEY_LENGTH], plaintext: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| EncryptionError::EncryptFailed)?;

    let mut nonce_bytes = [0u8; AES_NONCE_LENGTH];
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| EncryptionError::EncryptFailed)?;

    let mut out = Vec::with_capacity(AES_NONCE_LENGTH + ciphertext.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt data previously produced by [`encrypt`].
///
/// # Errors
///
/// Returns [`EncryptionError::DecryptFailed`] if the key is wrong or the
/// data has been modified. We don't distinguish between the two.
pub fn decrypt(key: &[u8; AES_KEY_LENGTH], data: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    if data.len() < AES_NONCE_LENGTH + AES_TAG_LENGTH {
        return Err(EncryptionError::CiphertextTooShort);
    }

    let (nonce_bytes, ciphertext) = data.split_at(AES_NONCE_LENGTH);
    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| EncryptionError::DecryptFailed)?;
    let nonce = Nonce::from_slice(nonce_bytes);

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| EncryptionError::DecryptFailed)
}

/// Derive a key from `(password, salt)` and encrypt `plaintext` under it.
pub fn encrypt_with_password(
    plaintext: &[u8],
    password: &str,
    salt: &[u8],
) -> Result<Vec<u8>, EncryptionError> {
    let key = derive_key(password, salt)?;
    encrypt(&key, plaintext)
}

/// Inverse of [`encrypt_with_password`]. The plaintext is zeroized on drop.
pub fn decrypt_with_password(
    data: &[u8],
    password: &str,
    salt: &[u8],
) -> Result<Zeroizing<Vec<u8>>, EncryptionError> {
    let key = derive_key(password, salt)?;
    decrypt(&key, data).map(Zeroizing::new)
}
