//! CLI argument definitions using clap

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pregen-wallet",
    version,
    about = "Pregen Wallet - in-memory pregenerated wallet store with an HTTP API",
    long_about = None
)]
pub struct Cli {
    /// Path to the config file (default: ~/.pregen-wallet/config.json)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Host to bind (overrides config)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Port to bind (overrides config)
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// Default wallet type: evm, solana, cosmos (overrides config)
    #[arg(short, long, global = true)]
    pub wallet_type: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize or manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Start the HTTP server
    Serve {
        /// Disable `DELETE /wallet`
        #[arg(long)]
        no_reset: bool,

        /// Reject generate requests for ids that already have a wallet
        #[arg(long)]
        no_overwrite: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a config file with defaults
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}
