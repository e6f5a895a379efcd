//! # Key Management
//!
//! The [`KeyStore`] is a signing identity: an Ed25519 public key, the
//! matching secret key, and the public-key hash that serves as the
//! account address. All three are kept in their prefix-tagged string form
//! (`edpk…`, `edsk…`, `tz1…`) because that's how the wallet stores them
//! and how the node expects to see them.
//!
//! ## Security considerations
//!
//! - The secret key string is zeroized when the `KeyStore` is dropped.
//! - `Debug` output never includes the secret key. If you add logging to
//!   this module, log the public key hash and nothing else.
//! - Decoded `SigningKey`s are zeroized on drop by ed25519-dalek.
//!
//! ## Mnemonics
//!
//! Identities can be derived from a BIP-39 mnemonic plus a passphrase:
//! the first 32 bytes of the BIP-39 seed become the Ed25519 seed.
//! Fundraiser identities use `email + password` as that passphrase.

use bip39::{Language, Mnemonic};
use ed25519_dalek::{SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::encoding::{self, EncodingError, Prefix};
use super::hash::blake2b_160;
use crate::config::{ED25519_KEY_LENGTH, ED25519_SECRET_KEY_LENGTH, MNEMONIC_WORD_COUNT};

/// Errors that can occur during key operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The secret key string does not decode under either `edsk` form.
    #[error("invalid secret key: {0}")]
    InvalidSecretKey(EncodingError),

    /// The public key string does not decode under `edpk`.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(EncodingError),

    /// The 64-byte secret key's embedded public half doesn't match its seed.
    #[error("keypair validation failed: public key does not match secret key")]
    KeypairMismatch,

    /// Decoded 32 bytes that aren't a valid Ed25519 point.
    #[error("public key is not a valid Ed25519 point")]
    InvalidPoint,

    /// The mnemonic phrase failed BIP-39 validation.
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// Encoding a freshly derived key failed.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// A signing identity.
///
/// Immutable once created; there are no setters. Serializes with the
/// camelCase field names the wallet file has always used.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct KeyStore {
    public_key: String,
    private_key: String,
    public_key_hash: String,
}

impl KeyStore {
    /// Assemble an identity from already-encoded parts.
    ///
    /// No consistency check is made between the three values. Use
    /// [`KeyStore::from_secret_key`] when you only trust the secret key.
    pub fn new(
        public_key: impl Into<String>,
        private_key: impl Into<String>,
        public_key_hash: impl Into<String>,
    ) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
            public_key_hash: public_key_hash.into(),
        }
    }

    /// Derive a full identity from a 32-byte Ed25519 seed.
    pub fn from_seed(seed: &[u8; ED25519_KEY_LENGTH]) -> Result<Self, KeyError> {
        let signing_key = SigningKey::from_bytes(seed);
        Self::from_signing_key(&signing_key)
    }

    /// Derive a full identity from an `edsk…` secret key (either form).
    pub fn from_secret_key(secret_key: &str) -> Result<Self, KeyError> {
        let signing_key = decode_secret_key(secret_key)?;
        Self::from_signing_key(&signing_key)
    }

    fn from_signing_key(signing_key: &SigningKey) -> Result<Self, KeyError> {
        let verifying_key = signing_key.verifying_key();
        let secret = Zeroizing::new(signing_key.to_keypair_bytes());

        Ok(Self {
            public_key: encoding::encode(verifying_key.as_bytes(), Prefix::Edpk)?,
            private_key: encoding::encode(secret.as_slice(), Prefix::Edsk)?,
            public_key_hash: public_key_hash(&verifying_key)?,
        })
    }

    /// The `edpk…` public key.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// The `edsk…` secret key. Handle with care.
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// The `tz1…` address.
    pub fn public_key_hash(&self) -> &str {
        &self.public_key_hash
    }

    /// Decode the secret key for signing.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidSecretKey`] if the string is not a valid
    /// `edsk` value, or [`KeyError::KeypairMismatch`] if a 64-byte key's
    /// halves disagree.
    pub fn signing_key(&self) -> Result<SigningKey, KeyError> {
        decode_secret_key(&self.private_key)
    }

    /// Decode the public key for verification.
    pub fn verifying_key(&self) -> Result<VerifyingKey, KeyError> {
        decode_public_key(&self.public_key)
    }
}

impl fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStore")
            .field("public_key", &self.public_key)
            .field("public_key_hash", &self.public_key_hash)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Decode an `edsk…` secret key.
///
/// Both the 98-character form (seed ‖ public key) and the 54-character
/// seed-only form are accepted. The long form is checked for internal
/// consistency.
pub fn decode_secret_key(encoded: &str) -> Result<SigningKey, KeyError> {
    match encoding::decode(encoded, Prefix::Edsk) {
        Ok(bytes) => {
            let bytes = Zeroizing::new(bytes);
            let mut keypair = Zeroizing::new([0u8; ED25519_SECRET_KEY_LENGTH]);
            keypair.copy_from_slice(&bytes);
            SigningKey::from_keypair_bytes(&keypair).map_err(|_| KeyError::KeypairMismatch)
        }
        Err(long_form_err) => {
            let bytes = encoding::decode(encoded, Prefix::EdskSeed).map_err(|seed_err| {
                // Report the error from whichever form the input looked like.
                match seed_err {
                    EncodingError::PrefixMismatch { .. } => {
                        KeyError::InvalidSecretKey(long_form_err)
                    }
                    other => KeyError::InvalidSecretKey(other),
                }
            })?;
            let bytes = Zeroizing::new(bytes);
            let mut seed = Zeroizing::new([0u8; ED25519_KEY_LENGTH]);
            seed.copy_from_slice(&bytes);
            Ok(SigningKey::from_bytes(&seed))
        }
    }
}

/// Decode an `edpk…` public key.
pub fn decode_public_key(encoded: &str) -> Result<VerifyingKey, KeyError> {
    let bytes = encoding::decode(encoded, Prefix::Edpk).map_err(KeyError::InvalidPublicKey)?;
    let mut arr = [0u8; ED25519_KEY_LENGTH];
    arr.copy_from_slice(&bytes);
    VerifyingKey::from_bytes(&arr).map_err(|_| KeyError::InvalidPoint)
}

/// The `tz1…` address of a public key: BLAKE2b-160 of the raw key bytes.
pub fn public_key_hash(verifying_key: &VerifyingKey) -> Result<String, KeyError> {
    let hash = blake2b_160(verifying_key.as_bytes());
    Ok(encoding::encode(&hash, Prefix::Tz1)?)
}

/// Derive an identity from a BIP-39 mnemonic and passphrase.
///
/// Extra whitespace between words is tolerated; word validity and the
/// checksum are not negotiable.
pub fn keys_from_mnemonic(mnemonic: &str, passphrase: &str) -> Result<KeyStore, KeyError> {
    let normalized = mnemonic.split_whitespace().collect::<Vec<_>>().join(" ");
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, &normalized)
        .map_err(|e| KeyError::InvalidMnemonic(e.to_string()))?;

    let seed = Zeroizing::new(mnemonic.to_seed(passphrase));
    let mut ed_seed = Zeroizing::new([0u8; ED25519_KEY_LENGTH]);
    ed_seed.copy_from_slice(&seed[..ED25519_KEY_LENGTH]);
    KeyStore::from_seed(&ed_seed)
}

/// Generate a fresh fifteen-word English mnemonic.
pub fn new_mnemonic() -> Result<String, KeyError> {
    let mnemonic = Mnemonic::generate_in(Language::English, MNEMONIC_WORD_COUNT)
        .map_err(|e| KeyError::InvalidMnemonic(e.to_string()))?;
    Ok(mnemonic.to_string())
}
