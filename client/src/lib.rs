// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Tezos Client: Operation Pipeline and Keystore
//!
//! Builds, signs, dry-runs and injects Tezos operations through a remote
//! node, and keeps the identities that sign them in a password-encrypted
//! wallet file.
//!
//! The node does the chain-specific heavy lifting (binary forging and
//! simulation). Everything that touches a secret key happens locally.
//!
//! ## Architecture
//!
//! - **config**: Chain constants, crypto parameters, node connection settings.
//! - **crypto**: Base58check prefixes, BLAKE2b, Ed25519 keys and signing,
//!   Argon2id + AES-256-GCM.
//! - **operation**: Operation content, the builder, dry-run result types,
//!   and the pre-injection validator.
//! - **node**: The `TezosNode` trait and its HTTP implementation.
//! - **pipeline**: head, forge, sign, apply, validate, inject.
//! - **vault**: Encrypted wallet files and mnemonic identity recovery.
//! - **logging**: `tracing` subscriber setup.
//!
//! ## Example
//!
//! ```no_run
//! use tezos_client::config::NodeConfig;
//! use tezos_client::node::HttpNode;
//! use tezos_client::pipeline::OperationPipeline;
//! use tezos_client::vault::load_wallet;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let wallet = load_wallet("wallet.tezwallet".as_ref(), "password")?;
//! let identity = &wallet.identities[0];
//!
//! let node = HttpNode::new(&NodeConfig::from_env())?;
//! let pipeline = OperationPipeline::new(node);
//! let result = pipeline
//!     .send_transaction("main", identity, "tz1Receiver", 1_000, 1_300)
//!     .await?;
//! println!("injected {}", result.operation_group_id);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod crypto;
pub mod logging;
pub mod node;
pub mod operation;
pub mod pipeline;
pub mod vault;

pub use node::{HttpNode, NodeError, TezosNode};
pub use operation::{OperationBuilder, OperationContent, OperationResult};
pub use pipeline::{OperationPipeline, SubmissionError};
pub use vault::{Wallet, WalletError};
