//! Storage data models
//!
//! Defines the wallet record kept by the store and the secret share it carries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::types::{IdentifierType, WalletType};

/// Public descriptor of a generated wallet
///
/// Owned by the store once inserted and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletData {
    /// Provider-internal wallet identifier
    pub id: String,

    /// On-chain address
    pub address: String,

    /// Chain family of the wallet
    pub wallet_type: WalletType,

    /// Identifier kind the wallet was reserved for
    pub pregen_identifier_type: IdentifierType,
}

impl WalletData {
    /// Descriptor carrying only an address, for callers that generate wallets elsewhere
    pub fn with_address(id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            wallet_type: WalletType::Evm,
            pregen_identifier_type: IdentifierType::CustomId,
        }
    }
}

/// Secret key-share material handed back to the wallet owner
///
/// ⚠️ Sensitive: `Debug` is redacted and the buffer is wiped on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserShare(String);

impl UserShare {
    pub fn new(share: impl Into<String>) -> Self {
        Self(share.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for UserShare {
    fn from(share: String) -> Self {
        Self(share)
    }
}

impl From<&str> for UserShare {
    fn from(share: &str) -> Self {
        Self(share.to_string())
    }
}

impl std::fmt::Debug for UserShare {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("UserShare(<redacted>)")
    }
}

impl Drop for UserShare {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Stored tuple of wallet data, secret share and creation time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    /// Store key (handle or generated UUID)
    pub id: String,

    /// Public wallet descriptor
    pub wallet_data: WalletData,

    /// Secret share required to claim the wallet
    pub user_share: UserShare,

    /// When the record was inserted
    pub created_at: DateTime<Utc>,
}
