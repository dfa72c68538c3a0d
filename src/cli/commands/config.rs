//! Config command implementations

use std::path::Path;

use crate::config::{load_config, save_config, ConfigError, ConfigOverrides, GlobalConfig};

/// Initialize configuration file with defaults
pub fn init(config_path: Option<&Path>, force: bool) -> Result<(), ConfigError> {
    let path = match config_path {
        Some(p) => p.to_path_buf(),
        None => crate::config::default_config_path()?,
    };

    if path.exists() && !force {
        return Err(ConfigError::Invalid(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    save_config(&GlobalConfig::default(), Some(path.as_path()))?;

    println!("✓ Configuration initialized");
    println!("  Config file: {}", path.display());

    Ok(())
}

/// Print the effective configuration after env and CLI overrides
pub fn show(config_path: Option<&Path>, overrides: ConfigOverrides) -> Result<(), ConfigError> {
    let config = load_config(config_path, overrides)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
