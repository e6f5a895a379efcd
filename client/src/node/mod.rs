//! # Node Access
//!
//! The client talks to exactly one remote collaborator: a Tezos node. Every
//! chain read and every forge/preapply/inject goes through [`TezosNode`],
//! so the pipeline never touches HTTP directly and tests can stand a mock
//! in its place.
//!
//! [`HttpNode`] is the production implementation over the node's JSON RPC.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use crate::operation::{
    Account, AppliedOperationPayload, AppliedOperationResult, BlockHead, ManagerKey,
    UnsignedOperationGroup,
};

pub use http::HttpNode;

/// Errors from a remote node call. Surfaced unchanged; nothing retries.
#[derive(Debug, Error)]
pub enum NodeError {
    /// The request never got a response (connect, timeout, TLS, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The node answered with a non-success status.
    #[error("node returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },

    /// The node answered 2xx but the body wasn't what the call expects.
    #[error("invalid node response: {0}")]
    InvalidResponse(String),
}

/// A Tezos node, as seen by the submission pipeline.
///
/// `network` is the chain name in the RPC path (`main`, a test chain, …).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TezosNode: Send + Sync {
    /// Current head of the chain.
    async fn get_block_head(&self, network: &str) -> Result<BlockHead, NodeError>;

    /// Account state for `account_id` as of `block_hash`.
    async fn get_account_for_block(
        &self,
        network: &str,
        block_hash: &str,
        account_id: &str,
    ) -> Result<Account, NodeError>;

    /// Manager key for `account_id` as of `block_hash`.
    async fn get_account_manager_for_block(
        &self,
        network: &str,
        block_hash: &str,
        account_id: &str,
    ) -> Result<ManagerKey, NodeError>;

    /// Forge an unsigned group into its binary form. Returns hex.
    async fn forge_operation(
        &self,
        network: &str,
        group: &UnsignedOperationGroup,
    ) -> Result<String, NodeError>;

    /// Dry-run signed groups against the head. One result per group.
    async fn apply_operation(
        &self,
        network: &str,
        payload: &[AppliedOperationPayload],
    ) -> Result<Vec<AppliedOperationResult>, NodeError>;

    /// Broadcast signed bytes (hex). Returns the operation group id.
    async fn inject_operation(&self, network: &str, signed_hex: &str) -> Result<String, NodeError>;
}
