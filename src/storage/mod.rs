//! Storage layer for pregenerated wallets
//!
//! Record models and the in-memory wallet store.

pub mod models;
pub mod wallet_store;

pub use models::{UserShare, WalletData, WalletRecord};
pub use wallet_store::{StoreError, WalletStore};
