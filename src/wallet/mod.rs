//! Wallet creation layer
//!
//! The [`WalletProvider`] trait is what the generate endpoint calls to create a
//! pregenerated wallet. [`LocalWalletProvider`] creates keys in-process and
//! keeps its half of each key in memory.

pub mod keys;
pub mod provider;
pub mod shares;

pub use keys::{derive_address, generate_secret, KeyError};
pub use provider::LocalWalletProvider;
pub use shares::ShareError;

use crate::storage::models::{UserShare, WalletData};
use crate::types::{IdentifierType, WalletType};

/// Wallet provider errors
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Key generation failed: {0}")]
    KeyGeneration(#[from] KeyError),

    #[error("Key sharing failed: {0}")]
    Sharing(#[from] ShareError),

    #[error("Share does not belong to wallet {0}")]
    InvalidShare(String),

    #[error("Unknown wallet: {0}")]
    UnknownWallet(String),
}

/// Output of a wallet creation call
#[derive(Debug, Clone)]
pub struct GeneratedWallet {
    /// Public descriptor to store
    pub wallet: WalletData,

    /// Owner's half of the key
    pub user_share: UserShare,
}

/// Creates pregenerated wallets reserved for an identifier
pub trait WalletProvider: Send + Sync {
    /// Create a wallet for `identifier`
    ///
    /// The identifier is only used for bookkeeping; callers validate it first.
    fn create_pregen_wallet(
        &self,
        identifier: &str,
        identifier_type: IdentifierType,
        wallet_type: WalletType,
    ) -> Result<GeneratedWallet, ProviderError>;

    /// Drop the provider's key material for one wallet
    ///
    /// Returns false if the wallet was unknown.
    fn forget(&self, wallet_id: &str) -> bool;

    /// Drop the key material for every wallet, returning how many were held
    fn clear_custody(&self) -> usize;
}
