//! In-memory store for pregenerated wallet records
//!
//! Maps a textual identifier (handle or UUID) to the generated wallet and the
//! user share needed to claim it. State lives for the lifetime of the process
//! and is never written to disk.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::storage::models::{UserShare, WalletData, WalletRecord};

/// Store errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Wallet already exists: {0}")]
    Conflict(String),
}

#[derive(Default)]
struct Inner {
    records: HashMap<String, WalletRecord>,

    /// Last timestamp handed out, keeps `created_at` non-decreasing
    last_created_at: Option<DateTime<Utc>>,
}

impl Inner {
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let stamp = match self.last_created_at {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_created_at = Some(stamp);
        stamp
    }

    fn insert(
        &mut self,
        id: &str,
        wallet_data: WalletData,
        user_share: UserShare,
    ) -> Option<WalletRecord> {
        let created_at = self.next_timestamp();
        self.records.insert(
            id.to_string(),
            WalletRecord {
                id: id.to_string(),
                wallet_data,
                user_share,
                created_at,
            },
        )
    }
}

/// Process-wide wallet record store
///
/// Shared between request handlers behind an `Arc`. Lookups take the read
/// lock, inserts and clears take the write lock, so concurrent writers to the
/// same key resolve as last-write-wins without torn records.
#[derive(Default)]
pub struct WalletStore {
    inner: RwLock<Inner>,
}

impl WalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the record for `id`
    ///
    /// Stamps the current time as `created_at`. Overwriting is silent.
    ///
    /// # Returns
    ///
    /// The key the record was stored under
    pub fn store(&self, id: &str, wallet_data: WalletData, user_share: UserShare) -> String {
        self.replace(id, wallet_data, user_share);
        id.to_string()
    }

    /// Insert or overwrite the record for `id`, handing back the record it replaced
    pub fn replace(
        &self,
        id: &str,
        wallet_data: WalletData,
        user_share: UserShare,
    ) -> Option<WalletRecord> {
        let mut inner = self.write();
        let previous = inner.insert(id, wallet_data, user_share);

        if previous.is_some() {
            log::debug!("Overwrote wallet record '{}'", id);
        } else {
            log::debug!("Stored wallet record '{}'", id);
        }

        previous
    }

    /// Insert the record for `id` only if the key is free
    ///
    /// The existence check and the insert happen under one write lock.
    pub fn try_store(
        &self,
        id: &str,
        wallet_data: WalletData,
        user_share: UserShare,
    ) -> Result<String, StoreError> {
        let mut inner = self.write();
        if inner.records.contains_key(id) {
            return Err(StoreError::Conflict(id.to_string()));
        }
        inner.insert(id, wallet_data, user_share);

        log::debug!("Stored wallet record '{}'", id);

        Ok(id.to_string())
    }

    /// Look up the record for `id`
    pub fn get(&self, id: &str) -> Option<WalletRecord> {
        self.read().records.get(id).cloned()
    }

    /// Look up only the user share for `id`
    pub fn get_share(&self, id: &str) -> Option<UserShare> {
        self.read()
            .records
            .get(id)
            .map(|record| record.user_share.clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().records.is_empty()
    }

    /// Remove every record
    ///
    /// # Returns
    ///
    /// Number of records removed
    pub fn clear_all(&self) -> usize {
        let mut inner = self.write();
        let cleared = inner.records.len();
        inner.records.clear();

        log::info!("Cleared {} wallet record(s)", cleared);

        cleared
    }

    // A panic while holding the lock cannot leave a half-written record, so a
    // poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
