//! Tests for LocalWalletProvider
//!
//! A user share combined with the provider's custody share must rebuild the
//! secret behind the wallet address.

use pregen_wallet::storage::UserShare;
use pregen_wallet::types::{IdentifierType, WalletType};
use pregen_wallet::wallet::{derive_address, LocalWalletProvider, ProviderError, WalletProvider};

#[test]
fn test_user_share_recovers_wallet_secret_for_every_type() {
    // Setup
    let provider = LocalWalletProvider::new();

    for wallet_type in [WalletType::Evm, WalletType::Solana, WalletType::Cosmos] {
        let generated = provider
            .create_pregen_wallet("alice", IdentifierType::CustomId, wallet_type)
            .unwrap();

        assert_eq!(generated.wallet.wallet_type, wallet_type);
        assert_eq!(generated.wallet.pregen_identifier_type, IdentifierType::CustomId);

        let secret = provider
            .recover_secret(&generated.wallet.id, &generated.user_share)
            .unwrap_or_else(|e| panic!("{} recovery failed: {}", wallet_type, e));

        let address = derive_address(wallet_type, &secret).unwrap();
        assert_eq!(
            address, generated.wallet.address,
            "Recovered {} secret should derive the wallet address",
            wallet_type
        );
    }

    assert_eq!(provider.custody_len(), 3, "One custody share per wallet");
}

#[test]
fn test_address_formats_per_wallet_type() {
    // Setup
    let provider = LocalWalletProvider::new();

    let evm = provider
        .create_pregen_wallet("a", IdentifierType::CustomId, WalletType::Evm)
        .unwrap();
    assert!(evm.wallet.address.starts_with("0x"));
    assert_eq!(evm.wallet.address.len(), 42);

    let solana = provider
        .create_pregen_wallet("b", IdentifierType::CustomId, WalletType::Solana)
        .unwrap();
    let decoded = bs58::decode(&solana.wallet.address).into_vec().unwrap();
    assert_eq!(decoded.len(), 32, "Solana address should be a 32-byte public key");

    let cosmos = provider
        .create_pregen_wallet("c", IdentifierType::CustomId, WalletType::Cosmos)
        .unwrap();
    assert!(cosmos.wallet.address.starts_with("cosmos1"));
}

#[test]
fn test_share_from_another_wallet_is_rejected() {
    // Setup
    let provider = LocalWalletProvider::new();
    let first = provider
        .create_pregen_wallet("alice", IdentifierType::CustomId, WalletType::Evm)
        .unwrap();
    let second = provider
        .create_pregen_wallet("bob", IdentifierType::CustomId, WalletType::Evm)
        .unwrap();

    let result = provider.recover_secret(&first.wallet.id, &second.user_share);

    assert!(
        matches!(result, Err(ProviderError::InvalidShare(ref id)) if id == &first.wallet.id),
        "Foreign share should be rejected, got {:?}",
        result.map(|_| ())
    );
}

#[test]
fn test_malformed_share_is_rejected() {
    // Setup
    let provider = LocalWalletProvider::new();
    let generated = provider
        .create_pregen_wallet("alice", IdentifierType::CustomId, WalletType::Evm)
        .unwrap();

    let result = provider.recover_secret(&generated.wallet.id, &UserShare::new("not-hex"));

    assert!(matches!(result, Err(ProviderError::Sharing(_))));
}

#[test]
fn test_unknown_wallet_id() {
    let provider = LocalWalletProvider::new();

    let result = provider.recover_secret("missing", &UserShare::new("00"));

    assert!(matches!(result, Err(ProviderError::UnknownWallet(ref id)) if id == "missing"));
}

#[test]
fn test_each_wallet_gets_fresh_id_and_share() {
    // Setup
    let provider = LocalWalletProvider::new();

    let a = provider
        .create_pregen_wallet("same", IdentifierType::CustomId, WalletType::Evm)
        .unwrap();
    let b = provider
        .create_pregen_wallet("same", IdentifierType::CustomId, WalletType::Evm)
        .unwrap();

    assert_ne!(a.wallet.id, b.wallet.id);
    assert_ne!(a.wallet.address, b.wallet.address);
    assert_ne!(a.user_share, b.user_share);
}

#[test]
fn test_forget_releases_one_wallet() {
    // Setup
    let provider = LocalWalletProvider::new();
    let kept = provider
        .create_pregen_wallet("alice", IdentifierType::CustomId, WalletType::Evm)
        .unwrap();
    let dropped = provider
        .create_pregen_wallet("bob", IdentifierType::CustomId, WalletType::Solana)
        .unwrap();

    assert!(provider.forget(&dropped.wallet.id));
    assert!(!provider.forget(&dropped.wallet.id), "Second forget finds nothing");
    assert_eq!(provider.custody_len(), 1);

    let result = provider.recover_secret(&dropped.wallet.id, &dropped.user_share);
    assert!(matches!(result, Err(ProviderError::UnknownWallet(_))));
    assert!(provider
        .recover_secret(&kept.wallet.id, &kept.user_share)
        .is_ok());
}

#[test]
fn test_clear_custody_drops_every_share() {
    // Setup
    let provider = LocalWalletProvider::new();
    for id in ["a", "b", "c"] {
        provider
            .create_pregen_wallet(id, IdentifierType::CustomId, WalletType::Cosmos)
            .unwrap();
    }

    assert_eq!(provider.clear_custody(), 3);
    assert_eq!(provider.custody_len(), 0);
    assert_eq!(provider.clear_custody(), 0);
}
