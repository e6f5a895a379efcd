//! # Vault
//!
//! Password-protected storage for identities. See [`wallet`] for the file
//! format and the mnemonic-based identity recovery helpers.

pub mod wallet;

pub use wallet::{
    create_wallet, generate_mnemonic, load_wallet, save_wallet, unlock_fundraiser_identity,
    unlock_identity_with_mnemonic, EncryptedWallet, Wallet, WalletError, WalletFormat,
};
