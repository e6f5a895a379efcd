//! # Prefix-Tagged Base58Check
//!
//! Every opaque string the chain hands around (addresses, keys, signatures,
//! block and operation hashes) is `base58check(prefix ‖ payload)`. The
//! prefix bytes are chosen so the encoded string starts with a readable
//! tag: `tz1…`, `edpk…`, `edsig…`, `op…`.
//!
//! Decoding checks three things, in order: the checksum, the prefix, and
//! the payload length. A string that passes all three is the value it
//! claims to be. Anything else is an [`EncodingError`].
//!
//! The checksum itself (first four bytes of double SHA-256) comes from the
//! `bs58` crate's `check` feature.

use thiserror::Error;

use crate::config::{
    ED25519_KEY_LENGTH, ED25519_SECRET_KEY_LENGTH, OPERATION_HASH_LENGTH, PUBLIC_KEY_HASH_LENGTH,
    SIGNATURE_LENGTH,
};

/// Errors from prefix-tagged encoding and decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    /// Not valid base58, or the checksum does not match.
    #[error("invalid base58check string: {0}")]
    InvalidBase58(String),

    /// Decoded fine, but starts with a different prefix.
    #[error("expected a {expected} value, prefix does not match")]
    PrefixMismatch {
        /// Human-readable tag of the expected prefix.
        expected: &'static str,
    },

    /// Correct prefix, wrong payload length.
    #[error("{tag} payload must be {expected} bytes, got {got}")]
    InvalidLength {
        /// Human-readable tag of the prefix.
        tag: &'static str,
        /// Required payload length.
        expected: usize,
        /// Length actually found.
        got: usize,
    },
}

/// Known prefix tags.
///
/// Each variant knows its raw prefix bytes and the exact payload length it
/// wraps, so `decode` can reject a well-formed string of the wrong type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// Ed25519 public-key hash (`tz1…`), 20 bytes.
    Tz1,
    /// Ed25519 public key (`edpk…`), 32 bytes.
    Edpk,
    /// Ed25519 secret key, seed ‖ public key (`edsk…`, 98 chars), 64 bytes.
    Edsk,
    /// Ed25519 seed (`edsk…`, 54 chars), 32 bytes.
    EdskSeed,
    /// Ed25519 signature (`edsig…`), 64 bytes.
    Edsig,
    /// Operation group hash (`o…`), 32 bytes.
    Operation,
    /// Block hash (`B…`), 32 bytes.
    Block,
    /// Chain id (`Net…`), 4 bytes.
    ChainId,
    /// Protocol hash (`P…`), 32 bytes.
    Protocol,
}

impl Prefix {
    /// Raw prefix bytes prepended before base58check encoding.
    pub fn bytes(self) -> &'static [u8] {
        match self {
            Prefix::Tz1 => &[6, 161, 159],
            Prefix::Edpk => &[13, 15, 37, 217],
            Prefix::Edsk => &[43, 246, 78, 7],
            Prefix::EdskSeed => &[13, 15, 58, 7],
            Prefix::Edsig => &[9, 245, 205, 134, 18],
            Prefix::Operation => &[5, 116],
            Prefix::Block => &[1, 52],
            Prefix::ChainId => &[87, 82, 0],
            Prefix::Protocol => &[2, 170],
        }
    }

    /// Payload length (excluding prefix and checksum).
    pub fn payload_length(self) -> usize {
        match self {
            Prefix::Tz1 => PUBLIC_KEY_HASH_LENGTH,
            Prefix::Edpk | Prefix::EdskSeed => ED25519_KEY_LENGTH,
            Prefix::Edsk => ED25519_SECRET_KEY_LENGTH,
            Prefix::Edsig => SIGNATURE_LENGTH,
            Prefix::Operation | Prefix::Block | Prefix::Protocol => OPERATION_HASH_LENGTH,
            Prefix::ChainId => 4,
        }
    }

    /// The readable tag this prefix produces.
    pub fn tag(self) -> &'static str {
        match self {
            Prefix::Tz1 => "tz1",
            Prefix::Edpk => "edpk",
            Prefix::Edsk | Prefix::EdskSeed => "edsk",
            Prefix::Edsig => "edsig",
            Prefix::Operation => "op",
            Prefix::Block => "B",
            Prefix::ChainId => "Net",
            Prefix::Protocol => "P",
        }
    }
}

/// Encode `payload` under `prefix`.
///
/// # Errors
///
/// Returns [`EncodingError::InvalidLength`] if the payload length is not
/// the one the prefix wraps. Encoding a 31-byte "block hash" would produce
/// a string no node accepts, so we refuse up front.
///
/// # Example
///
/// ```
/// use tezos_client::crypto::encoding::{encode, Prefix};
///
/// let op = encode(&[0u8; 32], Prefix::Operation).unwrap();
/// assert!(op.starts_with('o'));
/// ```
pub fn encode(payload: &[u8], prefix: Prefix) -> Result<String, EncodingError> {
    if payload.len() != prefix.payload_length() {
        return Err(EncodingError::InvalidLength {
            tag: prefix.tag(),
            expected: prefix.payload_length(),
            got: payload.len(),
        });
    }

    let mut buf = Vec::with_capacity(prefix.bytes().len() + payload.len());
    buf.extend_from_slice(prefix.bytes());
    buf.extend_from_slice(payload);
    Ok(encode_raw(&buf))
}

/// Decode `encoded`, verifying checksum, prefix, and payload length.
/// Returns the payload with the prefix stripped.
pub fn decode(encoded: &str, prefix: Prefix) -> Result<Vec<u8>, EncodingError> {
    let raw = decode_raw(encoded)?;
    let tag = prefix.bytes();

    let payload = raw
        .strip_prefix(tag)
        .ok_or(EncodingError::PrefixMismatch {
            expected: prefix.tag(),
        })?;

    if payload.len() != prefix.payload_length() {
        return Err(EncodingError::InvalidLength {
            tag: prefix.tag(),
            expected: prefix.payload_length(),
            got: payload.len(),
        });
    }

    Ok(payload.to_vec())
}

/// Base58check without a prefix. Used for wallet salts and ciphertexts,
/// which have no chain-level type.
pub fn encode_raw(bytes: &[u8]) -> String {
    bs58::encode(bytes).with_check().into_string()
}

/// Inverse of [`encode_raw`]; verifies the checksum.
pub fn decode_raw(encoded: &str) -> Result<Vec<u8>, EncodingError> {
    bs58::decode(encoded)
        .with_check(None)
        .into_vec()
        .map_err(|e| EncodingError::InvalidBase58(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_PREFIXES: [Prefix; 9] = [
        Prefix::Tz1,
        Prefix::Edpk,
        Prefix::Edsk,
        Prefix::EdskSeed,
        Prefix::Edsig,
        Prefix::Operation,
        Prefix::Block,
        Prefix::ChainId,
        Prefix::Protocol,
    ];

    #[test]
    fn decode_inverts_encode_for_every_prefix() {
        for prefix in ALL_PREFIXES {
            let payload: Vec<u8> = (0..prefix.payload_length())
                .map(|i| (i as u8).wrapping_mul(7))
                .collect();
            let encoded = encode(&payload, prefix).unwrap();
            assert_eq!(decode(&encoded, prefix).unwrap(), payload, "{:?}", prefix);
        }
    }

    #[test]
    fn encoded_strings_carry_readable_tags() {
        assert!(encode(&[0u8; 20], Prefix::Tz1).unwrap().starts_with("tz1"));
        assert!(encode(&[0u8; 32], Prefix::Edpk).unwrap().starts_with("edpk"));
        assert!(encode(&[0u8; 64], Prefix::Edsk).unwrap().starts_with("edsk"));
        assert!(encode(&[0u8; 32], Prefix::EdskSeed).unwrap().starts_with("edsk"));
        assert!(encode(&[0u8; 64], Prefix::Edsig).unwrap().starts_with("edsig"));
        assert!(encode(&[0u8; 32], Prefix::Operation).unwrap().starts_with('o'));
        assert!(encode(&[0u8; 32], Prefix::Block).unwrap().starts_with('B'));
        assert!(encode(&[0u8; 4], Prefix::ChainId).unwrap().starts_with("Net"));
        assert!(encode(&[0u8; 32], Prefix::Protocol).unwrap().starts_with('P'));
    }

    #[test]
    fn known_address_vector() {
        // tz1 of an all-zero hash, a fixed point worth pinning.
        let addr = encode(&[0u8; 20], Prefix::Tz1).unwrap();
        assert_eq!(addr, "tz1Ke2h7sDdakHJQh8WX4Z372du1KChsksyU");
    }

    #[test]
    fn wrong_prefix_is_rejected() {
        let pk = encode(&[1u8; 32], Prefix::Edpk).unwrap();
        assert_eq!(
            decode(&pk, Prefix::Block),
            Err(EncodingError::PrefixMismatch { expected: "B" })
        );
    }

    #[test]
    fn wrong_payload_length_is_rejected_on_encode() {
        assert!(matches!(
            encode(&[0u8; 31], Prefix::Block),
            Err(EncodingError::InvalidLength { expected: 32, got: 31, .. })
        ));
    }

    #[test]
    fn corrupted_checksum_is_rejected() {
        let encoded = encode(&[9u8; 32], Prefix::Operation).unwrap();
        let mut chars: Vec<char> = encoded.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == '1' { '2' } else { '1' };
        let tampered: String = chars.into_iter().collect();
        assert!(matches!(
            decode(&tampered, Prefix::Operation),
            Err(EncodingError::InvalidBase58(_))
        ));
    }

    #[test]
    fn not_base58_is_rejected() {
        // '0', 'O', 'I' and 'l' are outside the alphabet.
        assert!(decode_raw("0OIl").is_err());
    }

    #[test]
    fn raw_roundtrip_accepts_any_length() {
        let bytes = b"salt of arbitrary size".to_vec();
        assert_eq!(decode_raw(&encode_raw(&bytes)).unwrap(), bytes);
    }
}
