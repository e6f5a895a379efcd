//! # Client Configuration & Constants
//!
//! Every magic number the client relies on lives here: watermark bytes,
//! default operation limits, key-derivation cost parameters, and the
//! node connection defaults. If you're hardcoding one of these somewhere
//! else, move it here.
//!
//! The wire-level values (watermark, hash lengths) are fixed by the chain.
//! Changing them doesn't make the client "configurable", it makes every
//! signature it produces invalid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Watermark byte prepended to forged bytes before hashing.
/// `0x03` tags the payload as a "generic operation" so a signature over it
/// can never be replayed as a block or endorsement signature.
pub const GENERIC_OPERATION_WATERMARK: u8 = 0x03;

/// Output length of the generic hash used for signing and operation hashes.
pub const OPERATION_HASH_LENGTH: usize = 32;

/// Output length of the public-key hash behind `tz1` addresses.
pub const PUBLIC_KEY_HASH_LENGTH: usize = 20;

/// Ed25519 seed / public key length in bytes.
pub const ED25519_KEY_LENGTH: usize = 32;

/// Ed25519 expanded secret key length (seed ‖ public key).
pub const ED25519_SECRET_KEY_LENGTH: usize = 64;

/// Ed25519 signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Operation Defaults
// ---------------------------------------------------------------------------

/// Default gas limit for manager operations.
pub const DEFAULT_GAS_LIMIT: u64 = 120;

/// Default storage limit for manager operations.
pub const DEFAULT_STORAGE_LIMIT: u64 = 0;

/// Kinds the client knows how to build, and therefore the only kinds it is
/// willing to see echoed back from a dry run.
pub const SUPPORTED_OPERATION_KINDS: [&str; 5] = [
    "activate_account",
    "reveal",
    "transaction",
    "origination",
    "delegation",
];

// ---------------------------------------------------------------------------
// Wallet Encryption
// ---------------------------------------------------------------------------

/// On-disk wallet format version tag.
pub const WALLET_FORMAT_VERSION: &str = "1";

/// On-disk KDF tag.
pub const WALLET_KDF_TAG: &str = "Argon2";

/// Salt length for Argon2id, in bytes.
pub const WALLET_SALT_LENGTH: usize = 16;

/// Argon2id memory cost in KiB (32 MiB, the "interactive" profile).
pub const ARGON2_MEMORY_KIB: u32 = 32 * 1024;

/// Argon2id pass count.
pub const ARGON2_ITERATIONS: u32 = 4;

/// Argon2id lanes.
pub const ARGON2_PARALLELISM: u32 = 1;

/// AES-256-GCM key length in bytes.
pub const AES_KEY_LENGTH: usize = 32;

/// AES-256-GCM nonce length in bytes. 96 bits, the only length you should use.
pub const AES_NONCE_LENGTH: usize = 12;

/// AES-256-GCM authentication tag length in bytes.
pub const AES_TAG_LENGTH: usize = 16;

/// Word count of freshly generated mnemonics.
pub const MNEMONIC_WORD_COUNT: usize = 15;

// ---------------------------------------------------------------------------
// Node Connection
// ---------------------------------------------------------------------------

/// Default node RPC endpoint.
pub const DEFAULT_NODE_URL: &str = "http://127.0.0.1:8732";

/// Per-request timeout for node RPC calls. This is the only timeout in the
/// submission path; the pipeline itself never gives up on its own.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable overriding [`NodeConfig::url`].
pub const NODE_URL_ENV: &str = "TEZOS_NODE_URL";

/// Connection settings for [`crate::node::HttpNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Base URL of the node RPC server, without a trailing slash.
    pub url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_RPC_TIMEOUT.as_secs()
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_NODE_URL.to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl NodeConfig {
    /// Config pointing at `url` with the default timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Defaults, with the URL taken from `TEZOS_NODE_URL` when it is set.
    pub fn from_env() -> Self {
        match std::env::var(NODE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::default(),
        }
    }

    /// The request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The base URL with any trailing slashes removed.
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

/// Returns `true` if `kind` is one the client builds and accepts back.
pub fn is_supported_kind(kind: &str) -> bool {
    SUPPORTED_OPERATION_KINDS.contains(&kind)
}
