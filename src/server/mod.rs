//! HTTP server exposing the wallet store
//!
//! The store and provider are built once and injected into every handler
//! through [`AppState`].

pub mod dto;
pub mod error;
pub mod handlers;

use std::future::Future;
use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::config::{ConfigError, GlobalConfig};
use crate::storage::WalletStore;
use crate::wallet::{LocalWalletProvider, WalletProvider};

pub use error::ApiError;

/// Shared state handed to every request handler
pub struct AppState {
    pub config: GlobalConfig,
    pub store: Arc<WalletStore>,
    pub provider: Arc<dyn WalletProvider>,
}

impl AppState {
    /// State with an empty store and the in-process provider
    pub fn new(config: GlobalConfig) -> Self {
        Self::with_parts(
            config,
            Arc::new(WalletStore::new()),
            Arc::new(LocalWalletProvider::new()),
        )
    }

    pub fn with_parts(
        config: GlobalConfig,
        store: Arc<WalletStore>,
        provider: Arc<dyn WalletProvider>,
    ) -> Self {
        Self {
            config,
            store,
            provider,
        }
    }
}

/// Server errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Build the router with permissive CORS for browser demos
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::ping))
        .route("/health", get(handlers::health))
        .route("/wallet", delete(handlers::clear_all))
        .route("/wallet/generate", post(handlers::generate))
        .route("/wallet/bulk-generate", post(handlers::bulk_generate))
        .route("/wallet/retrieve", get(handlers::retrieve))
        .with_state(state)
        .layer(cors)
}

/// Bind to the configured address and serve until Ctrl-C
pub async fn serve(config: GlobalConfig) -> Result<(), ServerError> {
    config.validate()?;

    let listener = TcpListener::bind(config.bind_address()).await?;
    let state = Arc::new(AppState::new(config));

    serve_on(listener, state, shutdown_signal()).await
}

/// Serve on an already-bound listener until `shutdown` resolves
pub async fn serve_on<F>(
    listener: TcpListener,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown requested");
}
