//! Key generation and address derivation
//!
//! Generates 32-byte wallet secrets and derives chain addresses from them:
//! - EVM: secp256k1, Keccak-256 of the uncompressed public key, EIP-55 checksum
//! - Solana: ed25519 seed, base58 public key
//! - Cosmos: secp256k1, bech32 over hash160 of the compressed public key

use bech32::{ToBase32, Variant};
use bitcoin::hashes::{hash160, Hash};
use ed25519_dalek::SigningKey;
use rand::rngs::OsRng;
use rand::RngCore;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use tiny_keccak::{Hasher, Keccak};
use zeroize::Zeroizing;

use crate::types::WalletType;

/// Human-readable prefix for Cosmos Hub addresses
pub const COSMOS_HRP: &str = "cosmos";

/// Length of every wallet secret in bytes
pub const SECRET_LEN: usize = 32;

/// Key generation and derivation errors
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Secp256k1 error: {0}")]
    Secp256k1(String),

    #[error("Invalid secret length: expected 32 bytes, got {0}")]
    InvalidLength(usize),

    #[error("Address encoding error: {0}")]
    Encoding(String),
}

/// Generate a fresh wallet secret for the given wallet type
///
/// secp256k1 wallets get a valid secret key, Solana wallets a random ed25519 seed.
pub fn generate_secret(wallet_type: WalletType) -> Zeroizing<Vec<u8>> {
    match wallet_type {
        WalletType::Evm | WalletType::Cosmos => {
            let secp = Secp256k1::new();
            let (secret_key, _) = secp.generate_keypair(&mut secp256k1::rand::thread_rng());
            Zeroizing::new(secret_key.secret_bytes().to_vec())
        }
        WalletType::Solana => {
            let mut seed = Zeroizing::new(vec![0u8; SECRET_LEN]);
            OsRng.fill_bytes(seed.as_mut_slice());
            seed
        }
    }
}

/// Derive the on-chain address for a wallet secret
///
/// # Arguments
///
/// * `wallet_type` - Chain family that decides the key scheme and encoding
/// * `secret` - 32-byte secret from [`generate_secret`] or share recovery
///
/// # Example
///
/// ```ignore
/// let secret = generate_secret(WalletType::Evm);
/// let address = derive_address(WalletType::Evm, &secret)?;
/// assert!(address.starts_with("0x"));
/// ```
pub fn derive_address(wallet_type: WalletType, secret: &[u8]) -> Result<String, KeyError> {
    if secret.len() != SECRET_LEN {
        return Err(KeyError::InvalidLength(secret.len()));
    }

    match wallet_type {
        WalletType::Evm => {
            let public_key = secp256k1_public_key(secret)?;
            let uncompressed = public_key.serialize_uncompressed();
            // Skip the 0x04 tag byte
            let hash = keccak256(&uncompressed[1..]);
            Ok(to_checksum_address(&hash[12..]))
        }
        WalletType::Cosmos => {
            let public_key = secp256k1_public_key(secret)?;
            let hash = hash160::Hash::hash(&public_key.serialize());
            bech32::encode(
                COSMOS_HRP,
                hash.to_byte_array().to_base32(),
                Variant::Bech32,
            )
            .map_err(|e| KeyError::Encoding(e.to_string()))
        }
        WalletType::Solana => {
            let mut seed = Zeroizing::new([0u8; SECRET_LEN]);
            seed.copy_from_slice(secret);
            let signing_key = SigningKey::from_bytes(&seed);
            Ok(bs58::encode(signing_key.verifying_key().as_bytes()).into_string())
        }
    }
}

/// Format 20 address bytes as an EIP-55 mixed-case checksum address
pub fn to_checksum_address(address: &[u8]) -> String {
    let lower = hex::encode(address);
    let hash = keccak256(lower.as_bytes());

    let mut checksummed = String::with_capacity(2 + lower.len());
    checksummed.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            checksummed.push(c.to_ascii_uppercase());
        } else {
            checksummed.push(c);
        }
    }
    checksummed
}

fn secp256k1_public_key(secret: &[u8]) -> Result<PublicKey, KeyError> {
    let secret_key = SecretKey::from_slice(secret)
        .map_err(|e| KeyError::Secp256k1(format!("Invalid secret key: {}", e)))?;
    let secp = Secp256k1::new();
    Ok(PublicKey::from_secret_key(&secp, &secret_key))
}

fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}
