//! Operation content and group types.
//!
//! The five operation kinds are a tagged enum with one variant per kind,
//! each carrying exactly its wire fields. Numeric fields are `u64` in
//! memory and decimal strings on the wire; the node rejects JSON numbers
//! for these fields, and floats have no business near amounts anyway.

use serde::{Deserialize, Serialize};

/// Serde adapter: `u64` <-> decimal string.
pub(crate) mod decimal {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<u64>()
            .map_err(|_| de::Error::custom(format!("expected a decimal string, got {:?}", s)))
    }
}

// ---------------------------------------------------------------------------
// Operation Content
// ---------------------------------------------------------------------------

/// One operation inside a group.
///
/// Serialized with an internal `kind` tag, e.g.
/// `{"kind": "transaction", "source": "tz1…", "amount": "1000", …}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OperationContent {
    Transaction(Transaction),
    Delegation(Delegation),
    Origination(Origination),
    Reveal(Reveal),
    ActivateAccount(ActivateAccount),
}

impl OperationContent {
    /// The wire `kind` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            OperationContent::Transaction(_) => "transaction",
            OperationContent::Delegation(_) => "delegation",
            OperationContent::Origination(_) => "origination",
            OperationContent::Reveal(_) => "reveal",
            OperationContent::ActivateAccount(_) => "activate_account",
        }
    }

    /// The counter, for the four manager operations. Activations have none.
    pub fn counter(&self) -> Option<u64> {
        match self {
            OperationContent::Transaction(op) => Some(op.counter),
            OperationContent::Delegation(op) => Some(op.counter),
            OperationContent::Origination(op) => Some(op.counter),
            OperationContent::Reveal(op) => Some(op.counter),
            OperationContent::ActivateAccount(_) => None,
        }
    }
}

/// A Michelson expression passed as transaction parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    pub prim: String,
    #[serde(default)]
    pub args: Vec<serde_json::Value>,
}

impl Default for Parameters {
    /// The unit value, `{"prim": "Unit", "args": []}`.
    fn default() -> Self {
        Self {
            prim: "Unit".to_string(),
            args: Vec::new(),
        }
    }
}

/// Transfer `amount` mutez from `source` to `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub source: String,
    pub destination: String,
    #[serde(with = "decimal")]
    pub amount: u64,
    #[serde(with = "decimal")]
    pub fee: u64,
    #[serde(with = "decimal")]
    pub counter: u64,
    #[serde(with = "decimal")]
    pub gas_limit: u64,
    #[serde(with = "decimal")]
    pub storage_limit: u64,
    pub parameters: Parameters,
}

/// Set `source`'s delegate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    pub source: String,
    pub delegate: String,
    #[serde(with = "decimal")]
    pub fee: u64,
    #[serde(with = "decimal")]
    pub counter: u64,
    #[serde(with = "decimal")]
    pub gas_limit: u64,
    #[serde(with = "decimal")]
    pub storage_limit: u64,
}

/// Originate a new account managed by `manager_pubkey`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Origination {
    pub source: String,
    #[serde(rename = "managerPubkey")]
    pub manager_pubkey: String,
    #[serde(with = "decimal")]
    pub balance: u64,
    pub spendable: bool,
    pub delegatable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegate: Option<String>,
    #[serde(with = "decimal")]
    pub fee: u64,
    #[serde(with = "decimal")]
    pub counter: u64,
    #[serde(with = "decimal")]
    pub gas_limit: u64,
    #[serde(with = "decimal")]
    pub storage_limit: u64,
}

/// Publish `public_key` as the manager key of `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub source: String,
    pub public_key: String,
    #[serde(with = "decimal")]
    pub fee: u64,
    #[serde(with = "decimal")]
    pub counter: u64,
    #[serde(with = "decimal")]
    pub gas_limit: u64,
    #[serde(with = "decimal")]
    pub storage_limit: u64,
}

/// Claim a fundraiser allocation for `pkh` using its activation `secret`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivateAccount {
    pub pkh: String,
    pub secret: String,
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// What gets sent to the node for forging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedOperationGroup {
    pub branch: String,
    pub contents: Vec<OperationContent>,
}

/// Forged bytes plus signature.
///
/// `bytes` is `forged ‖ raw signature`, exactly what gets injected.
/// `signature` is the `edsig…` encoding of the same signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedOperationGroup {
    pub bytes: Vec<u8>,
    pub signature: String,
}

impl SignedOperationGroup {
    /// Hex encoding of `bytes`, the injection payload.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

/// One entry in a dry-run (preapply) request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedOperationPayload {
    pub protocol: String,
    pub branch: String,
    pub contents: Vec<OperationContent>,
    pub signature: String,
}

// ---------------------------------------------------------------------------
// Chain State
// ---------------------------------------------------------------------------

/// Summary of a block header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub level: i64,
    #[serde(default)]
    pub predecessor: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// The current head, as far as the client cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHead {
    pub hash: String,
    pub protocol: String,
    pub chain_id: String,
    #[serde(default)]
    pub header: Option<BlockHeader>,
}

/// An account's state at a given block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(with = "decimal")]
    pub balance: u64,
    #[serde(with = "decimal")]
    pub counter: u64,
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub delegate: Option<serde_json::Value>,
}

/// An account's manager key. `key` is `None` until a reveal lands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerKey {
    #[serde(default)]
    pub manager: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
}

impl ManagerKey {
    /// `true` exactly when a key is present.
    pub fn is_revealed(&self) -> bool {
        self.key.is_some()
    }
}
