//! Pregen Wallet
//!
//! In-memory store for pregenerated wallets and their user shares, served
//! over a small JSON HTTP API for wallet demo frontends.

pub mod cli;
pub mod config;
pub mod server;
pub mod storage;
pub mod types;
pub mod validation;
pub mod wallet;
