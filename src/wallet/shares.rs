//! 2-of-2 Shamir splitting of wallet secrets
//!
//! Share 0 goes to the wallet owner as the user share, share 1 stays with the
//! provider. Both are needed to rebuild the secret.

use bc_rand::SecureRandomNumberGenerator;
use bc_shamir::{recover_secret, split_secret};
use zeroize::Zeroizing;

pub const THRESHOLD: usize = 2;
pub const SHARES: usize = 2;

pub const USER_SHARE_INDEX: usize = 0;
pub const PROVIDER_SHARE_INDEX: usize = 1;

/// Share splitting errors
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("Split failed: {0}")]
    Split(String),

    #[error("Recovery failed: {0}")]
    Recover(String),

    #[error("Malformed share: {0}")]
    Malformed(String),
}

/// A secret split into its user and provider halves
pub struct SplitSecret {
    pub user_share: Zeroizing<Vec<u8>>,
    pub provider_share: Zeroizing<Vec<u8>>,
}

/// Split a wallet secret into a user share and a provider share
pub fn split(secret: &[u8]) -> Result<SplitSecret, ShareError> {
    let mut rng = SecureRandomNumberGenerator;
    let mut shares = split_secret(THRESHOLD, SHARES, secret, &mut rng)
        .map_err(|e| ShareError::Split(e.to_string()))?;

    if shares.len() != SHARES {
        return Err(ShareError::Split(format!(
            "expected {} shares, got {}",
            SHARES,
            shares.len()
        )));
    }

    let provider_share = Zeroizing::new(shares.remove(PROVIDER_SHARE_INDEX));
    let user_share = Zeroizing::new(shares.remove(USER_SHARE_INDEX));

    Ok(SplitSecret {
        user_share,
        provider_share,
    })
}

/// Rebuild the secret from both shares
pub fn combine(user_share: &[u8], provider_share: &[u8]) -> Result<Zeroizing<Vec<u8>>, ShareError> {
    if user_share.len() != provider_share.len() {
        return Err(ShareError::Malformed(format!(
            "share lengths differ ({} vs {})",
            user_share.len(),
            provider_share.len()
        )));
    }

    let indexes = [USER_SHARE_INDEX, PROVIDER_SHARE_INDEX];
    let shares = Zeroizing::new(vec![user_share.to_vec(), provider_share.to_vec()]);
    let secret = recover_secret(&indexes, shares.as_slice())
        .map_err(|e| ShareError::Recover(e.to_string()))?;

    Ok(Zeroizing::new(secret))
}

/// Encode a share for transport as the user share string
pub fn encode_share(share: &[u8]) -> String {
    hex::encode(share)
}

pub fn decode_share(encoded: &str) -> Result<Zeroizing<Vec<u8>>, ShareError> {
    hex::decode(encoded.trim())
        .map(Zeroizing::new)
        .map_err(|e| ShareError::Malformed(e.to_string()))
}
