//! # Operation Signing
//!
//! Turns forged operation bytes into a signed payload the node will
//! accept. The procedure is fixed by the chain:
//!
//! 1. Prepend the generic-operation watermark (`0x03`) to the forged bytes.
//! 2. BLAKE2b-256 the watermarked bytes.
//! 3. Ed25519-sign the 32-byte digest (detached, not the raw bytes).
//! 4. The injectable payload is `forged ‖ signature` *without* the
//!    watermark. The watermark only exists inside the hash.
//!
//! The operation-group hash is BLAKE2b-256 of that payload, `op`-encoded.
//! It's known before injection and is what the network will report back.

use ed25519_dalek::{Signature, Signer};
use thiserror::Error;

use super::encoding::{self, EncodingError, Prefix};
use super::hash::blake2b_256;
use super::keys::{decode_public_key, KeyError, KeyStore};
use crate::config::{GENERIC_OPERATION_WATERMARK, SIGNATURE_LENGTH};
use crate::operation::SignedOperationGroup;

/// Errors during operation signing and verification.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignerError {
    /// The node's forged bytes are not valid hex.
    #[error("forged bytes are not valid hex: {0}")]
    InvalidForgedBytes(String),

    /// The identity's keys failed to decode. Nothing was signed.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// A signature or hash failed to encode/decode.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// The digest that actually gets signed: `blake2b_256(0x03 ‖ forged)`.
pub fn signing_digest(forged: &[u8]) -> [u8; 32] {
    let mut watermarked = Vec::with_capacity(1 + forged.len());
    watermarked.push(GENERIC_OPERATION_WATERMARK);
    watermarked.extend_from_slice(forged);
    blake2b_256(&watermarked)
}

/// Sign hex-encoded forged bytes with `identity`.
///
/// # Errors
///
/// - [`SignerError::InvalidForgedBytes`] if `forged_hex` isn't hex.
/// - [`SignerError::Key`] if the private key doesn't decode.
///
/// # Example
///
/// ```
/// use tezos_client::crypto::{keys::KeyStore, signatures::sign_operation};
///
/// let identity = KeyStore::from_seed(&[7u8; 32]).unwrap();
/// let signed = sign_operation("deadbeef", &identity).unwrap();
/// assert!(signed.signature.starts_with("edsig"));
/// assert_eq!(signed.bytes.len(), 4 + 64);
/// ```
pub fn sign_operation(
    forged_hex: &str,
    identity: &KeyStore,
) -> Result<SignedOperationGroup, SignerError> {
    let forged =
        hex::decode(forged_hex).map_err(|e| SignerError::InvalidForgedBytes(e.to_string()))?;
    let signing_key = identity.signing_key()?;

    let digest = signing_digest(&forged);
    let signature = signing_key.sign(&digest).to_bytes();

    let mut bytes = forged;
    bytes.extend_from_slice(&signature);

    Ok(SignedOperationGroup {
        bytes,
        signature: encoding::encode(&signature, Prefix::Edsig)?,
    })
}

/// The operation-group hash of a signed payload, as an `o…` string.
///
/// Deterministic: the same signed bytes always give the same hash.
pub fn compute_operation_hash(signed: &SignedOperationGroup) -> Result<String, SignerError> {
    let hash = blake2b_256(&signed.bytes);
    Ok(encoding::encode(&hash, Prefix::Operation)?)
}

/// Verify an `edsig` signature over forged bytes against an `edpk` key.
///
/// Returns `Ok(false)` for a well-formed signature that doesn't verify;
/// errors are reserved for inputs that don't even decode.
pub fn verify_operation(
    forged_hex: &str,
    signature: &str,
    public_key: &str,
) -> Result<bool, SignerError> {
    let forged =
        hex::decode(forged_hex).map_err(|e| SignerError::InvalidForgedBytes(e.to_string()))?;
    let verifying_key = decode_public_key(public_key)?;

    let raw = encoding::decode(signature, Prefix::Edsig)?;
    let mut sig_bytes = [0u8; SIGNATURE_LENGTH];
    sig_bytes.copy_from_slice(&raw);
    let signature = Signature::from_bytes(&sig_bytes);

    Ok(verifying_key
        .verify_strict(&signing_digest(&forged), &signature)
        .is_ok())
}
