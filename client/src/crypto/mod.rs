//! # Cryptographic Primitives
//!
//! Everything security-related in the client flows through here: the
//! prefix-tagged encoding of keys and hashes, the generic hash, password
//! based encryption for the wallet, identity keys, and operation signing.
//!
//! - **Ed25519** for signatures, via ed25519-dalek.
//! - **BLAKE2b** for the chain's generic hash.
//! - **Argon2id + AES-256-GCM** for wallet encryption.
//! - **Base58check** with type prefixes for every opaque string.
//!
//! Everything here is a thin, typed wrapper around audited crates. Don't
//! roll your own.

pub mod encoding;
pub mod encryption;
pub mod hash;
pub mod keys;
pub mod signatures;

pub use encoding::{decode, encode, EncodingError, Prefix};
pub use encryption::{decrypt_with_password, encrypt_with_password, random_salt, EncryptionError};
pub use hash::{blake2b_160, blake2b_256};
pub use keys::{keys_from_mnemonic, new_mnemonic, KeyError, KeyStore};
pub use signatures::{compute_operation_hash, sign_operation, verify_operation, SignerError};
