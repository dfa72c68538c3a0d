//! Tests for the in-memory WalletStore
//!
//! Covers insert/overwrite semantics, share lookup, clearing and the
//! insert-if-absent path used when overwrites are disabled.

use std::sync::Arc;
use std::thread;

use pregen_wallet::storage::{StoreError, UserShare, WalletData, WalletStore};
use pregen_wallet::types::{IdentifierType, WalletType};

fn evm_wallet(id: &str, address: &str) -> WalletData {
    WalletData::with_address(id, address)
}

#[test]
fn test_get_before_store_is_absent() {
    // Setup
    let store = WalletStore::new();

    assert!(store.get("alice").is_none(), "Empty store should have no records");
    assert!(store.get_share("alice").is_none(), "Empty store should have no shares");
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
}

#[test]
fn test_store_then_get_returns_record() {
    // Setup
    let store = WalletStore::new();
    let wallet = evm_wallet("w-1", "0xABC");

    // Store
    let id = store.store("alice", wallet.clone(), UserShare::new("share123"));
    assert_eq!(id, "alice", "store should return the id it was given");

    // Verify record
    let record = store.get("alice").expect("Record should exist after store");
    assert_eq!(record.id, "alice");
    assert_eq!(record.wallet_data, wallet);
    assert_eq!(record.wallet_data.address, "0xABC");
    assert_eq!(record.user_share.expose(), "share123");

    // createdAt serializes as ISO 8601
    let json = serde_json::to_value(&record).unwrap();
    let created_at = json["createdAt"].as_str().expect("createdAt should be a string");
    assert!(
        chrono::DateTime::parse_from_rfc3339(created_at).is_ok(),
        "createdAt should be RFC 3339, got {}",
        created_at
    );
    assert_eq!(json["walletData"]["address"], "0xABC");
    assert_eq!(json["userShare"], "share123");
}

#[test]
fn test_get_share_matches_stored_share() {
    // Setup
    let store = WalletStore::new();
    store.store("alice", evm_wallet("w-1", "0xABC"), UserShare::new("share123"));

    let share = store.get_share("alice").expect("Share should exist");
    assert_eq!(share.expose(), "share123");
    assert!(store.get_share("nonexistent").is_none());
}

#[test]
fn test_second_store_overwrites_first() {
    // Setup
    let store = WalletStore::new();

    store.store("bob", evm_wallet("w-1", "0x111"), UserShare::new("S1"));
    let first = store.get("bob").unwrap();

    store.store("bob", evm_wallet("w-2", "0x222"), UserShare::new("S2"));
    let second = store.get("bob").unwrap();

    assert_eq!(second.user_share.expose(), "S2", "Last write should win");
    assert_eq!(second.wallet_data.address, "0x222");
    assert_eq!(second.wallet_data.id, "w-2");
    assert!(
        second.created_at >= first.created_at,
        "Overwrite should restamp createdAt"
    );
    assert_eq!(store.len(), 1, "Overwrite should not add a second record");
}

#[test]
fn test_try_store_conflict_leaves_record_intact() {
    // Setup
    let store = WalletStore::new();
    store
        .try_store("carol", evm_wallet("w-1", "0x111"), UserShare::new("S1"))
        .expect("First insert should succeed");

    // Second insert on the same id
    let result = store.try_store("carol", evm_wallet("w-2", "0x222"), UserShare::new("S2"));
    assert_eq!(result, Err(StoreError::Conflict("carol".to_string())));

    let record = store.get("carol").unwrap();
    assert_eq!(record.user_share.expose(), "S1", "Original share should be kept");
    assert_eq!(record.wallet_data.id, "w-1");
}

#[test]
fn test_clear_all_removes_every_record() {
    // Setup
    let store = WalletStore::new();
    for (i, id) in ["alice", "bob", "carol"].iter().enumerate() {
        store.store(
            id,
            evm_wallet(&format!("w-{}", i), "0xABC"),
            UserShare::new(format!("share-{}", i)),
        );
    }
    assert_eq!(store.len(), 3);

    let cleared = store.clear_all();

    assert_eq!(cleared, 3, "clear_all should report the removed count");
    assert!(store.is_empty());
    for id in ["alice", "bob", "carol"] {
        assert!(store.get(id).is_none(), "{} should be gone after clear", id);
        assert!(!store.contains(id));
    }

    // Clearing an empty store is a no-op
    assert_eq!(store.clear_all(), 0);
}

#[test]
fn test_created_at_is_non_decreasing() {
    // Setup
    let store = WalletStore::new();

    let mut previous = None;
    for i in 0..50 {
        let id = format!("user-{}", i);
        store.store(&id, evm_wallet(&id, "0xABC"), UserShare::new("s"));
        let created_at = store.get(&id).unwrap().created_at;
        if let Some(prev) = previous {
            assert!(created_at >= prev, "createdAt went backwards at insert {}", i);
        }
        previous = Some(created_at);
    }
}

#[test]
fn test_record_keeps_wallet_type_and_identifier_type() {
    // Setup
    let store = WalletStore::new();
    let wallet = WalletData {
        id: "w-sol".to_string(),
        address: "4Nd1mYw4r7kY5mVbCvvLMbMgfvbNyPNFkAK3VhvS7vmq".to_string(),
        wallet_type: WalletType::Solana,
        pregen_identifier_type: IdentifierType::Email,
    };

    store.store("dave@example.com", wallet, UserShare::new("s"));

    let json = serde_json::to_value(store.get("dave@example.com").unwrap()).unwrap();
    assert_eq!(json["walletData"]["walletType"], "SOLANA");
    assert_eq!(json["walletData"]["pregenIdentifierType"], "EMAIL");
}

#[test]
fn test_user_share_debug_is_redacted() {
    let share = UserShare::new("super-secret-share");
    let debug = format!("{:?}", share);

    assert!(!debug.contains("super-secret-share"), "Debug must not leak the share");
}

#[test]
fn test_concurrent_stores_on_same_key() {
    // Setup
    let store = Arc::new(WalletStore::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for j in 0..100 {
                    let share = format!("share-{}-{}", i, j);
                    store.store("shared", evm_wallet(&share, "0xABC"), UserShare::new(share.clone()));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Whichever write won, the record must be internally consistent
    let record = store.get("shared").unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(
        record.wallet_data.id,
        record.user_share.expose(),
        "Wallet data and share should come from the same write"
    );
}

#[test]
fn test_replace_returns_previous_record() {
    // Setup
    let store = WalletStore::new();

    let first = store.replace("bob", evm_wallet("w-1", "0x111"), UserShare::new("S1"));
    assert!(first.is_none(), "Nothing to replace on first insert");

    let previous = store
        .replace("bob", evm_wallet("w-2", "0x222"), UserShare::new("S2"))
        .expect("Second insert should hand back the first record");

    assert_eq!(previous.wallet_data.id, "w-1");
    assert_eq!(previous.user_share.expose(), "S1");
    assert_eq!(store.get_share("bob").unwrap().expose(), "S2");
}
