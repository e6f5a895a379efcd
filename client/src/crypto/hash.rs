//! # Generic Hashing
//!
//! The chain's "generic hash" is unkeyed BLAKE2b. The client uses two
//! output lengths:
//!
//! - **32 bytes**: signing digests and operation-group hashes.
//! - **20 bytes**: public-key hashes behind `tz1` addresses.
//!
//! BLAKE2b parameterizes the output length into its IV, so a 20-byte
//! digest is *not* a truncated 32-byte digest. Don't slice one to get the
//! other.

use blake2::digest::consts::{U20, U32};
use blake2::{Blake2b, Digest};

use crate::config::{OPERATION_HASH_LENGTH, PUBLIC_KEY_HASH_LENGTH};

type Blake2b256 = Blake2b<U32>;
type Blake2b160 = Blake2b<U20>;

/// BLAKE2b with a 32-byte digest.
///
/// # Example
///
/// ```
/// use tezos_client::crypto::hash::blake2b_256;
///
/// assert_eq!(blake2b_256(b"tezos").len(), 32);
/// ```
pub fn blake2b_256(data: &[u8]) -> [u8; OPERATION_HASH_LENGTH] {
    let digest = Blake2b256::digest(data);
    let mut output = [0u8; OPERATION_HASH_LENGTH];
    output.copy_from_slice(&digest);
    output
}

/// BLAKE2b with a 20-byte digest. Used for public-key hashes.
pub fn blake2b_160(data: &[u8]) -> [u8; PUBLIC_KEY_HASH_LENGTH] {
    let digest = Blake2b160::digest(data);
    let mut output = [0u8; PUBLIC_KEY_HASH_LENGTH];
    output.copy_from_slice(&digest);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blake2b_256_known_vector() {
        // BLAKE2b-256 of the empty string.
        let expected =
            hex::decode("0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8")
                .unwrap();
        assert_eq!(blake2b_256(b"").to_vec(), expected);
    }

    #[test]
    fn short_digest_is_not_a_truncation() {
        let data = b"public key";
        assert_ne!(&blake2b_256(data)[..20], blake2b_160(data).as_slice());
    }

    #[test]
    fn deterministic() {
        assert_eq!(blake2b_256(b"tezos"), blake2b_256(b"tezos"));
        assert_ne!(blake2b_256(b"tezos"), blake2b_256(b"Tezos"));
    }
}
