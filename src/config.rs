//! Configuration types for the pregen wallet service
//!
//! Manages server bind settings, reset/overwrite policy, and wallet
//! generation defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::WalletType;

/// Global service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub server: ServerConfig,
    pub wallet: WalletConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allow `DELETE /wallet` to clear the store (demo/test reset)
    pub allow_reset: bool,
    /// Let a second generate for the same id replace the first record.
    /// When false the second request is rejected with 409.
    pub allow_overwrite: bool,
}

/// Wallet generation defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Wallet type used when a request does not name one
    pub default_wallet_type: WalletType,
    /// Upper bound on identifiers in one bulk request
    pub max_bulk_size: usize,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                allow_reset: true,
                allow_overwrite: true,
            },
            wallet: WalletConfig {
                default_wallet_type: WalletType::Evm,
                max_bulk_size: 100,
            },
        }
    }
}

impl GlobalConfig {
    /// `host:port` string for binding the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host must not be empty".into()));
        }
        if self.wallet.max_bulk_size == 0 {
            return Err(ConfigError::Invalid(
                "wallet.max_bulk_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Config directory not found")]
    DirectoryNotFound,
}

/// Configuration overrides from CLI arguments or environment variables
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub default_wallet_type: Option<WalletType>,
    pub allow_reset: Option<bool>,
    pub allow_overwrite: Option<bool>,
}

impl ConfigOverrides {
    /// Create empty overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Create overrides from environment variables
    ///
    /// Reads `PREGEN_HOST`, `PREGEN_PORT`, `PREGEN_WALLET_TYPE`,
    /// `PREGEN_ALLOW_RESET` and `PREGEN_ALLOW_OVERWRITE`. Unparseable values
    /// are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build overrides from any key lookup (environment or a test map)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host: lookup("PREGEN_HOST"),
            port: lookup("PREGEN_PORT").and_then(|s| s.parse().ok()),
            default_wallet_type: lookup("PREGEN_WALLET_TYPE").and_then(|s| s.parse().ok()),
            allow_reset: lookup("PREGEN_ALLOW_RESET").and_then(|s| parse_bool(&s)),
            allow_overwrite: lookup("PREGEN_ALLOW_OVERWRITE").and_then(|s| parse_bool(&s)),
        }
    }

    /// Merge with another set of overrides (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        if other.host.is_some() {
            self.host = other.host;
        }
        if other.port.is_some() {
            self.port = other.port;
        }
        if other.default_wallet_type.is_some() {
            self.default_wallet_type = other.default_wallet_type;
        }
        if other.allow_reset.is_some() {
            self.allow_reset = other.allow_reset;
        }
        if other.allow_overwrite.is_some() {
            self.allow_overwrite = other.allow_overwrite;
        }
        self
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Get the default configuration directory path
///
/// Returns: `~/.pregen-wallet/`
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".pregen-wallet"))
        .ok_or(ConfigError::DirectoryNotFound)
}

/// Get the default configuration file path
///
/// Returns: `~/.pregen-wallet/config.json`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(default_config_dir()?.join("config.json"))
}

/// Load configuration from file with overrides
///
/// # Priority (highest to lowest):
/// 1. CLI overrides (passed as argument)
/// 2. Environment variables
/// 3. Config file
/// 4. Defaults
///
/// # Example
///
/// ```ignore
/// use pregen_wallet::config::{load_config, ConfigOverrides};
///
/// let mut cli_overrides = ConfigOverrides::new();
/// cli_overrides.port = Some(8080);
///
/// let config = load_config(None, cli_overrides)?;
/// ```
pub fn load_config(
    config_path: Option<&Path>,
    cli_overrides: ConfigOverrides,
) -> Result<GlobalConfig, ConfigError> {
    let overrides = ConfigOverrides::from_env().merge(cli_overrides);
    load_config_with(config_path, overrides)
}

/// Load configuration applying exactly the given overrides (no environment lookup)
pub fn load_config_with(
    config_path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<GlobalConfig, ConfigError> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    let mut config = if path.exists() {
        log::debug!("Loading config from {}", path.display());
        let contents = std::fs::read_to_string(&path)?;
        serde_json::from_str(&contents)?
    } else {
        GlobalConfig::default()
    };

    apply_overrides(&mut config, overrides);
    config.validate()?;

    Ok(config)
}

/// Save configuration to file
///
/// Creates parent directories if they don't exist.
pub fn save_config(config: &GlobalConfig, config_path: Option<&Path>) -> Result<(), ConfigError> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;

    Ok(())
}

fn apply_overrides(config: &mut GlobalConfig, overrides: ConfigOverrides) {
    if let Some(host) = overrides.host {
        config.server.host = host;
    }
    if let Some(port) = overrides.port {
        config.server.port = port;
    }
    if let Some(wallet_type) = overrides.default_wallet_type {
        config.wallet.default_wallet_type = wallet_type;
    }
    if let Some(allow_reset) = overrides.allow_reset {
        config.server.allow_reset = allow_reset;
    }
    if let Some(allow_overwrite) = overrides.allow_overwrite {
        config.server.allow_overwrite = allow_overwrite;
    }
}
