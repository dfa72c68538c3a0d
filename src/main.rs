//! Pregen Wallet CLI
//!
//! Command-line entry point for running the pregenerated wallet server

use clap::Parser;
use pregen_wallet::cli::args::{Cli, Commands, ConfigAction};
use pregen_wallet::cli::commands;
use pregen_wallet::config::ConfigOverrides;
use pregen_wallet::types::WalletType;
use std::path::PathBuf;
use std::process;

fn main() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Parse wallet type string to WalletType
    let default_wallet_type = cli.wallet_type.as_ref().map(|t| {
        t.parse::<WalletType>().unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        })
    });

    // Build config overrides from global arguments
    let mut overrides = ConfigOverrides {
        host: cli.host.clone(),
        port: cli.port,
        default_wallet_type,
        ..ConfigOverrides::default()
    };

    let config_path = cli.config.as_ref().map(PathBuf::from);

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => {
                commands::config::init(config_path.as_deref(), force).map_err(Into::into)
            }

            ConfigAction::Show => {
                commands::config::show(config_path.as_deref(), overrides).map_err(Into::into)
            }
        },

        Commands::Serve {
            no_reset,
            no_overwrite,
        } => {
            if no_reset {
                overrides.allow_reset = Some(false);
            }
            if no_overwrite {
                overrides.allow_overwrite = Some(false);
            }
            commands::serve::run(config_path.as_deref(), overrides).map_err(Into::into)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
