//! # Encrypted Wallet File
//!
//! A [`Wallet`] is a list of identities. On disk it is a small JSON record
//! whose `ciphertext` is the identities list, sealed with a key derived
//! from the user's password:
//!
//! ```text
//! {
//!   "version":    "1",
//!   "salt":       b58check(16 random bytes),
//!   "ciphertext": b58check(nonce ‖ AES-256-GCM(identities JSON)),
//!   "kdf":        "Argon2"
//! }
//! ```
//!
//! Every save draws a fresh salt and nonce. GCM authenticates the
//! ciphertext, so a wrong password and a tampered file look the same:
//! [`WalletError::Decryption`].
//!
//! ## Format Versions
//!
//! [`WalletFormat`] names every on-disk layout this module can read. Today
//! there is one. A future layout gets its own variant and a branch in
//! [`WalletFormat::detect`]; loading it decrypts with the old scheme, and
//! the next [`save_wallet`] writes the current one.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{WALLET_FORMAT_VERSION, WALLET_KDF_TAG};
use crate::crypto::encoding::{self, EncodingError};
use crate::crypto::encryption::{self, EncryptionError};
use crate::crypto::keys::{self, KeyError, KeyStore};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from reading, writing, or unlocking wallets.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Authentication failed: wrong password or a corrupted file.
    #[error("wallet decryption failed (wrong password or corrupted file)")]
    Decryption,

    /// Key derivation or encryption failed while sealing the wallet.
    #[error("wallet encryption failed: {0}")]
    Encryption(EncryptionError),

    #[error("wallet I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file, or the decrypted payload, isn't the JSON we expect.
    #[error("malformed wallet data: {0}")]
    Format(#[from] serde_json::Error),

    /// `salt` or `ciphertext` isn't valid base58check.
    #[error("wallet field encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// A `version`/`kdf` combination this build can't read.
    #[error("unsupported wallet format: version {version:?}, kdf {kdf:?}")]
    UnsupportedFormat { version: String, kdf: String },

    /// Mnemonic or key material didn't decode.
    #[error(transparent)]
    Key(#[from] KeyError),
}

impl From<EncryptionError> for WalletError {
    fn from(e: EncryptionError) -> Self {
        match e {
            EncryptionError::DecryptFailed | EncryptionError::CiphertextTooShort => {
                WalletError::Decryption
            }
            other => WalletError::Encryption(other),
        }
    }
}

// ---------------------------------------------------------------------------
// Wallet
// ---------------------------------------------------------------------------

/// The decrypted contents of a wallet file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub identities: Vec<KeyStore>,
}

impl Wallet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `identity`. Order is preserved through save and load.
    pub fn add_identity(&mut self, identity: KeyStore) {
        self.identities.push(identity);
    }

    /// The identity whose address is `pkh`, if any.
    pub fn find_identity(&self, pkh: &str) -> Option<&KeyStore> {
        self.identities.iter().find(|k| k.public_key_hash() == pkh)
    }
}

// ---------------------------------------------------------------------------
// On-disk record
// ---------------------------------------------------------------------------

/// The JSON record actually written to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedWallet {
    pub version: String,
    pub salt: String,
    pub ciphertext: String,
    pub kdf: String,
}

/// Known on-disk layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletFormat {
    /// Version "1": Argon2id key derivation, AES-256-GCM, base58check fields.
    V1Argon2Aes,
}

impl WalletFormat {
    /// The format written by [`save_wallet`].
    pub const CURRENT: WalletFormat = WalletFormat::V1Argon2Aes;

    /// Identify the layout of `record` from its version and kdf tags.
    pub fn detect(record: &EncryptedWallet) -> Result<Self, WalletError> {
        match (record.version.as_str(), record.kdf.as_str()) {
            (WALLET_FORMAT_VERSION, WALLET_KDF_TAG) => Ok(WalletFormat::V1Argon2Aes),
            _ => Err(WalletError::UnsupportedFormat {
                version: record.version.clone(),
                kdf: record.kdf.clone(),
            }),
        }
    }
}

impl EncryptedWallet {
    /// Seal `wallet` under `password` in the current format.
    pub fn seal(wallet: &Wallet, password: &str) -> Result<Self, WalletError> {
        let plaintext = zeroize::Zeroizing::new(serde_json::to_vec(wallet)?);
        let salt = encryption::random_salt();
        let sealed = encryption::encrypt_with_password(&plaintext, password, &salt)?;

        Ok(Self {
            version: WALLET_FORMAT_VERSION.to_string(),
            salt: encoding::encode_raw(&salt),
            ciphertext: encoding::encode_raw(&sealed),
            kdf: WALLET_KDF_TAG.to_string(),
        })
    }

    /// Open this record with `password`.
    pub fn open(&self, password: &str) -> Result<Wallet, WalletError> {
        match WalletFormat::detect(self)? {
            WalletFormat::V1Argon2Aes => {
                let salt = encoding::decode_raw(&self.salt)?;
                let sealed = encoding::decode_raw(&self.ciphertext)?;
                let plaintext = encryption::decrypt_with_password(&sealed, password, &salt)?;
                Ok(serde_json::from_slice(&plaintext)?)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// File operations
// ---------------------------------------------------------------------------

/// Create an empty wallet at `path`.
pub fn create_wallet(path: &Path, password: &str) -> Result<Wallet, WalletError> {
    info!(path = %path.display(), "creating wallet");
    save_wallet(path, &Wallet::new(), password)
}

/// Encrypt and write `wallet` to `path`, then read it back.
///
/// The returned wallet is what's actually on disk, not a clone of the
/// input. The file is replaced atomically and, on Unix, is left
/// owner-read/write only even if it existed with wider permissions.
pub fn save_wallet(path: &Path, wallet: &Wallet, password: &str) -> Result<Wallet, WalletError> {
    let record = EncryptedWallet::seal(wallet, password)?;
    let json = serde_json::to_string_pretty(&record)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    // Write beside the target and rename over it, so the previous wallet
    // survives a failed write.
    let mut staged = NamedTempFile::new_in(dir)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    staged.write_all(json.as_bytes())?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;

    debug!(path = %path.display(), identities = wallet.identities.len(), "wallet written");
    load_wallet(path, password)
}

/// Read and decrypt the wallet at `path`.
pub fn load_wallet(path: &Path, password: &str) -> Result<Wallet, WalletError> {
    let json = fs::read_to_string(path)?;
    let record: EncryptedWallet = serde_json::from_str(&json)?;
    let wallet = record.open(password)?;
    debug!(path = %path.display(), identities = wallet.identities.len(), "wallet loaded");
    Ok(wallet)
}

// ---------------------------------------------------------------------------
// Identity derivation
// ---------------------------------------------------------------------------

/// Recover a fundraiser identity. The BIP-39 passphrase is `email + password`.
pub fn unlock_fundraiser_identity(
    mnemonic: &str,
    email: &str,
    password: &str,
) -> Result<KeyStore, WalletError> {
    let passphrase = zeroize::Zeroizing::new(format!("{}{}", email, password));
    unlock_identity_with_mnemonic(mnemonic, &passphrase)
}

/// Derive an identity from a mnemonic and an arbitrary passphrase.
pub fn unlock_identity_with_mnemonic(
    mnemonic: &str,
    passphrase: &str,
) -> Result<KeyStore, WalletError> {
    Ok(keys::keys_from_mnemonic(mnemonic, passphrase)?)
}

/// A fresh fifteen-word English mnemonic.
pub fn generate_mnemonic() -> Result<String, WalletError> {
    Ok(keys::new_mnemonic()?)
}
