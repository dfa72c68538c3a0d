//! Shared helpers for HTTP integration tests
//!
//! Spins up the router on an ephemeral port so every test gets its own
//! isolated store and provider.

use std::sync::Arc;

use pregen_wallet::config::GlobalConfig;
use pregen_wallet::server::{serve_on, AppState};
use pregen_wallet::storage::WalletStore;
use pregen_wallet::wallet::LocalWalletProvider;
use tokio::net::TcpListener;

/// Initialize logger for tests and load `.env`
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init_test_logger() {
    dotenv::dotenv().ok();
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Info)
        .try_init();
}

/// A running server and a handle to its state
pub struct TestServer {
    pub base_url: String,
    pub state: Arc<AppState>,
    /// Concrete provider behind `state.provider`, for custody checks
    pub provider: Arc<LocalWalletProvider>,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Start a server with default config
    pub async fn start() -> Self {
        Self::start_with(GlobalConfig::default()).await
    }

    /// Start a server with the given config (host/port are ignored)
    pub async fn start_with(config: GlobalConfig) -> Self {
        init_test_logger();

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let provider = Arc::new(LocalWalletProvider::new());
        let state = Arc::new(AppState::with_parts(
            config,
            Arc::new(WalletStore::new()),
            provider.clone(),
        ));
        let server_state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = serve_on(listener, server_state, std::future::pending()).await {
                eprintln!("Test server failed: {}", e);
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            provider,
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
