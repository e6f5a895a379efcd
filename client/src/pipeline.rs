//! # Submission Pipeline
//!
//! Head, forge, sign, dry-run, validate, inject. In that order, every time.
//!
//! ```text
//!   get_block_head ──► forge_operation ──► sign (local) ──► hash (local)
//!                                                              │
//!   inject_operation ◄── validate (local) ◄── apply_operation ◄┘
//! ```
//!
//! Each remote call is awaited before the next step starts and any failure
//! unwinds immediately. Nothing reaches the network's mempool unless the
//! dry run came back clean, so a rejected submission has no side effects.
//!
//! The account counter is read fresh from the node on every call. There is
//! no local counter cache and no lock: two concurrent submissions for the
//! same identity will race for the same counter and one of them will be
//! rejected by the node. Callers submitting in parallel must serialize per
//! identity.

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::crypto::keys::KeyStore;
use crate::crypto::signatures::{compute_operation_hash, sign_operation, SignerError};
use crate::node::{NodeError, TezosNode};
use crate::operation::{
    activation, validate_applied_result, AppliedOperationPayload, BuilderError, OperationBuilder,
    OperationContent, OperationResult, UnsignedOperationGroup, ValidationError,
};

/// Why a submission didn't make it to injection (or through it).
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// A remote call failed. Surfaced as-is.
    #[error("node call failed: {0}")]
    Node(#[from] NodeError),

    /// The dry run was rejected. Nothing was injected.
    #[error("dry run rejected: {0}")]
    Validation(#[from] ValidationError),

    /// Local signing failed. Nothing was sent past forging.
    #[error("signing failed: {0}")]
    Signer(#[from] SignerError),

    /// The account counter reported by the node can't be incremented.
    /// Nothing was forged.
    #[error("cannot build operation: {0}")]
    Builder(#[from] BuilderError),

    /// The node returned no dry-run results at all.
    #[error("dry run returned no results")]
    EmptyApplyResult,
}

impl SubmissionError {
    /// `true` if the node saw the operation and refused it, as opposed to
    /// a transport or local failure.
    pub fn is_rejection(&self) -> bool {
        matches!(self, SubmissionError::Validation(_))
    }
}

/// Drives operations through the node.
///
/// Generic over the node so tests can substitute a mock; production code
/// uses [`crate::node::HttpNode`].
#[derive(Debug, Clone)]
pub struct OperationPipeline<N> {
    node: N,
}

impl<N: TezosNode> OperationPipeline<N> {
    pub fn new(node: N) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    /// Submit a list of operation contents signed by `identity`.
    ///
    /// # Errors
    ///
    /// Any [`SubmissionError`]. If the error arises before the inject step,
    /// nothing was broadcast.
    #[instrument(skip_all, fields(network = %network, source = %identity.public_key_hash()))]
    pub async fn submit(
        &self,
        network: &str,
        operations: Vec<OperationContent>,
        identity: &KeyStore,
    ) -> Result<OperationResult, SubmissionError> {
        info!(network, count = operations.len(), "submitting operations");

        let head = self.node.get_block_head(network).await?;
        debug!(branch = %head.hash, protocol = %head.protocol, "fetched block head");

        let group = UnsignedOperationGroup {
            branch: head.hash.clone(),
            contents: operations,
        };
        let forged = self.node.forge_operation(network, &group).await?;
        debug!(forged_len = forged.len() / 2, "forged operation group");

        let signed = sign_operation(&forged, identity)?;
        let operation_hash = compute_operation_hash(&signed)?;
        debug!(operation_hash = %operation_hash, "signed operation group");

        let payload = [AppliedOperationPayload {
            protocol: head.protocol,
            branch: group.branch,
            contents: group.contents,
            signature: signed.signature.clone(),
        }];
        let applied = self.node.apply_operation(network, &payload).await?;

        let first = match applied.into_iter().next() {
            Some(result) => result,
            None => {
                warn!(operation_hash = %operation_hash, "dry run returned no results");
                return Err(SubmissionError::EmptyApplyResult);
            }
        };

        if let Err(e) = validate_applied_result(&first) {
            warn!(
                operation_hash = %operation_hash,
                node_id = e.diagnostic_id().unwrap_or("none"),
                "dry run rejected: {}",
                e
            );
            return Err(e.into());
        }
        debug!(operation_hash = %operation_hash, "dry run applied");

        let operation_group_id = self.node.inject_operation(network, &signed.to_hex()).await?;
        info!(
            operation_hash = %operation_hash,
            operation_group_id = %operation_group_id,
            "operation injected"
        );

        Ok(OperationResult {
            results: first,
            operation_group_id,
        })
    }

    /// Counter for `identity` as of the current head.
    async fn current_counter(&self, network: &str, identity: &KeyStore) -> Result<u64, NodeError> {
        let head = self.node.get_block_head(network).await?;
        let account = self
            .node
            .get_account_for_block(network, &head.hash, identity.public_key_hash())
            .await?;
        Ok(account.counter)
    }

    /// Transfer `amount` mutez to `destination`.
    pub async fn send_transaction(
        &self,
        network: &str,
        identity: &KeyStore,
        destination: &str,
        amount: u64,
        fee: u64,
    ) -> Result<OperationResult, SubmissionError> {
        let counter = self.current_counter(network, identity).await?;
        let op = OperationBuilder::new(identity.public_key_hash(), counter)?
            .fee(fee)
            .transaction(destination, amount);
        self.submit(network, vec![op], identity).await
    }

    /// Delegate the identity's account to `delegate`.
    pub async fn send_delegation(
        &self,
        network: &str,
        identity: &KeyStore,
        delegate: &str,
        fee: u64,
    ) -> Result<OperationResult, SubmissionError> {
        let counter = self.current_counter(network, identity).await?;
        let op = OperationBuilder::new(identity.public_key_hash(), counter)?
            .fee(fee)
            .delegation(delegate);
        self.submit(network, vec![op], identity).await
    }

    /// Originate a new account funded with `amount`.
    #[allow(clippy::too_many_arguments)]
    pub async fn send_origination(
        &self,
        network: &str,
        identity: &KeyStore,
        amount: u64,
        delegate: Option<&str>,
        spendable: bool,
        delegatable: bool,
        fee: u64,
    ) -> Result<OperationResult, SubmissionError> {
        let counter = self.current_counter(network, identity).await?;
        let op = OperationBuilder::new(identity.public_key_hash(), counter)?
            .fee(fee)
            .origination(amount, delegate, spendable, delegatable);
        self.submit(network, vec![op], identity).await
    }

    /// Publish the identity's public key on chain.
    pub async fn send_key_reveal(
        &self,
        network: &str,
        identity: &KeyStore,
        fee: u64,
    ) -> Result<OperationResult, SubmissionError> {
        let counter = self.current_counter(network, identity).await?;
        let op = OperationBuilder::new(identity.public_key_hash(), counter)?
            .fee(fee)
            .reveal(identity.public_key());
        self.submit(network, vec![op], identity).await
    }

    /// Activate a fundraiser account. No counter involved.
    pub async fn send_activation(
        &self,
        network: &str,
        identity: &KeyStore,
        activation_code: &str,
    ) -> Result<OperationResult, SubmissionError> {
        let op = activation(identity.public_key_hash(), activation_code);
        self.submit(network, vec![op], identity).await
    }

    /// Whether `pkh` has a revealed manager key as of the current head.
    pub async fn is_manager_key_revealed(
        &self,
        network: &str,
        pkh: &str,
    ) -> Result<bool, SubmissionError> {
        let head = self.node.get_block_head(network).await?;
        let manager = self
            .node
            .get_account_manager_for_block(network, &head.hash, pkh)
            .await?;
        Ok(manager.is_revealed())
    }
}
