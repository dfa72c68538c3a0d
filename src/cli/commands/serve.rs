//! Serve command implementation

use std::path::Path;

use crate::config::{load_config, ConfigOverrides};
use crate::server::{serve, ServerError};

/// Load config and run the HTTP server until Ctrl-C
pub fn run(config_path: Option<&Path>, overrides: ConfigOverrides) -> Result<(), ServerError> {
    let config = load_config(config_path, overrides)?;

    log::info!(
        "Starting pregen wallet server on {} (default wallet type {}, reset {}, overwrite {})",
        config.bind_address(),
        config.wallet.default_wallet_type,
        if config.server.allow_reset { "on" } else { "off" },
        if config.server.allow_overwrite { "on" } else { "off" },
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(serve(config))
}
