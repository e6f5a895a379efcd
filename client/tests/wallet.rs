//! Wallet file round trips through the public API, plus signing with a
//! recovered identity.

use tezos_client::crypto::signatures::{sign_operation, verify_operation};
use tezos_client::vault::{
    create_wallet, generate_mnemonic, load_wallet, save_wallet, unlock_fundraiser_identity,
    WalletError,
};

#[test]
fn fundraiser_identity_survives_wallet_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fundraiser.tezwallet");

    let mnemonic = generate_mnemonic().unwrap();
    let identity = unlock_fundraiser_identity(&mnemonic, "donor@example.com", "s3cret").unwrap();

    let mut wallet = create_wallet(&path, "wallet password").unwrap();
    wallet.add_identity(identity.clone());
    let saved = save_wallet(&path, &wallet, "wallet password").unwrap();
    assert_eq!(saved.identities.len(), 1);

    let loaded = load_wallet(&path, "wallet password").unwrap();
    let recovered = loaded.find_identity(identity.public_key_hash()).unwrap();
    assert_eq!(recovered, &identity);

    let signed = sign_operation("0a0b0c0d", recovered).unwrap();
    assert!(verify_operation("0a0b0c0d", &signed.signature, identity.public_key()).unwrap());
}

#[test]
fn wrong_password_yields_no_identities() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("w.tezwallet");
    let mut wallet = create_wallet(&path, "right").unwrap();
    wallet.add_identity(unlock_fundraiser_identity(&generate_mnemonic().unwrap(), "a@b.c", "p").unwrap());
    save_wallet(&path, &wallet, "right").unwrap();

    assert!(matches!(load_wallet(&path, "wrong"), Err(WalletError::Decryption)));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_wallet(&dir.path().join("absent"), "pw"),
        Err(WalletError::Io(_))
    ));
}
