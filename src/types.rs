//! Shared types for pregen-wallet
//!
//! Wallet and identifier kinds used across the store, provider and HTTP layers.

use serde::{Deserialize, Serialize};

/// Chain family of a pregenerated wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WalletType {
    /// secp256k1 key, EIP-55 checksummed `0x` address
    Evm,

    /// ed25519 key, base58 public key as address
    Solana,

    /// secp256k1 key, bech32 `cosmos1...` address
    Cosmos,
}

/// Kind of identifier a pregenerated wallet is reserved for
///
/// The identifier is a placeholder until the owner logs in and claims the wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentifierType {
    Email,
    Phone,
    Twitter,
    Discord,
    Telegram,
    #[default]
    CustomId,
}

impl std::fmt::Display for WalletType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletType::Evm => write!(f, "EVM"),
            WalletType::Solana => write!(f, "SOLANA"),
            WalletType::Cosmos => write!(f, "COSMOS"),
        }
    }
}

impl std::str::FromStr for WalletType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "evm" => Ok(WalletType::Evm),
            "solana" => Ok(WalletType::Solana),
            "cosmos" => Ok(WalletType::Cosmos),
            _ => Err(format!(
                "Invalid wallet type '{}'. Valid options: evm, solana, cosmos",
                s
            )),
        }
    }
}

impl std::fmt::Display for IdentifierType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierType::Email => write!(f, "EMAIL"),
            IdentifierType::Phone => write!(f, "PHONE"),
            IdentifierType::Twitter => write!(f, "TWITTER"),
            IdentifierType::Discord => write!(f, "DISCORD"),
            IdentifierType::Telegram => write!(f, "TELEGRAM"),
            IdentifierType::CustomId => write!(f, "CUSTOM_ID"),
        }
    }
}

impl std::str::FromStr for IdentifierType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "email" => Ok(IdentifierType::Email),
            "phone" => Ok(IdentifierType::Phone),
            "twitter" => Ok(IdentifierType::Twitter),
            "discord" => Ok(IdentifierType::Discord),
            "telegram" => Ok(IdentifierType::Telegram),
            "custom_id" | "custom" => Ok(IdentifierType::CustomId),
            _ => Err(format!(
                "Invalid identifier type '{}'. Valid options: email, phone, twitter, discord, telegram, custom_id",
                s
            )),
        }
    }
}
