//! In-process wallet provider
//!
//! Generates a wallet secret, derives its address, then splits the secret so
//! that the owner gets one share and the provider keeps the other.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;
use zeroize::Zeroizing;

use crate::storage::models::{UserShare, WalletData};
use crate::types::{IdentifierType, WalletType};
use crate::wallet::keys::{derive_address, generate_secret};
use crate::wallet::shares::{combine, decode_share, encode_share, split};
use crate::wallet::{GeneratedWallet, ProviderError, WalletProvider};

struct CustodyEntry {
    wallet_type: WalletType,
    address: String,
    share: Zeroizing<Vec<u8>>,
}

/// Wallet provider holding the provider-side share of every wallet it creates
///
/// Custody is in memory only, like the wallet store.
#[derive(Default)]
pub struct LocalWalletProvider {
    /// wallet id → provider share
    custody: RwLock<HashMap<String, CustodyEntry>>,
}

impl LocalWalletProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of wallets in custody
    pub fn custody_len(&self) -> usize {
        self.custody.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Rebuild a wallet secret from the owner's user share
    ///
    /// Fails with `InvalidShare` unless the recovered secret derives the
    /// wallet's recorded address.
    ///
    /// # Arguments
    ///
    /// * `wallet_id` - Provider wallet id from [`WalletData::id`]
    /// * `user_share` - Share returned by wallet creation
    pub fn recover_secret(
        &self,
        wallet_id: &str,
        user_share: &UserShare,
    ) -> Result<Zeroizing<Vec<u8>>, ProviderError> {
        let custody = self.custody.read().unwrap_or_else(|e| e.into_inner());
        let entry = custody
            .get(wallet_id)
            .ok_or_else(|| ProviderError::UnknownWallet(wallet_id.to_string()))?;

        let user_bytes = decode_share(user_share.expose())?;
        let secret = combine(&user_bytes, &entry.share)
            .map_err(|_| ProviderError::InvalidShare(wallet_id.to_string()))?;

        match derive_address(entry.wallet_type, &secret) {
            Ok(address) if address == entry.address => Ok(secret),
            _ => Err(ProviderError::InvalidShare(wallet_id.to_string())),
        }
    }
}

impl WalletProvider for LocalWalletProvider {
    fn create_pregen_wallet(
        &self,
        identifier: &str,
        identifier_type: IdentifierType,
        wallet_type: WalletType,
    ) -> Result<GeneratedWallet, ProviderError> {
        let secret = generate_secret(wallet_type);
        let address = derive_address(wallet_type, &secret)?;
        let split = split(&secret)?;

        let wallet_id = Uuid::new_v4().to_string();

        self.custody
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(
                wallet_id.clone(),
                CustodyEntry {
                    wallet_type,
                    address: address.clone(),
                    share: split.provider_share,
                },
            );

        log::info!(
            "Created {} wallet {} for {} identifier at {}",
            wallet_type,
            wallet_id,
            identifier_type,
            address
        );
        log::debug!("Wallet {} reserved for '{}'", wallet_id, identifier);

        Ok(GeneratedWallet {
            wallet: WalletData {
                id: wallet_id,
                address,
                wallet_type,
                pregen_identifier_type: identifier_type,
            },
            user_share: UserShare::new(encode_share(&split.user_share)),
        })
    }

    fn forget(&self, wallet_id: &str) -> bool {
        let removed = self
            .custody
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(wallet_id)
            .is_some();
        if removed {
            log::debug!("Released custody of wallet {}", wallet_id);
        }
        removed
    }

    fn clear_custody(&self) -> usize {
        let mut custody = self.custody.write().unwrap_or_else(|e| e.into_inner());
        let cleared = custody.len();
        custody.clear();

        log::info!("Released custody of {} wallet(s)", cleared);

        cleared
    }
}
