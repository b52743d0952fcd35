//! Help My Health Server
//!
//! Thin HTTP shell over the assistant: `POST /api/chat`, `GET /api/emergency`
//! and `GET /health`. All outbound calls share one `ReqwestFetcher`.

#![warn(missing_docs)]

pub mod config;
pub mod emergency;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use hmh_fetch::{FetchError, ReqwestFetcher};
use hmh_synthesizer::{HealthAssistant, SynthesizerError};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Pipeline could not be assembled
    #[error("Assistant error: {0}")]
    Assistant(#[from] SynthesizerError),

    /// HTTP client could not be created
    #[error("HTTP client error: {0}")]
    Client(#[from] FetchError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Initialize logging: `RUST_LOG` when set, else `default_filter`
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // a second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Build application state backed by real HTTP
pub fn build_state(config: &ServerConfig) -> Result<AppState<ReqwestFetcher>, ServerError> {
    let fetcher = Arc::new(ReqwestFetcher::new(&config.assistant.locator.user_agent)?);
    let assistant = HealthAssistant::new(Arc::clone(&fetcher), config.assistant.clone())?;
    Ok(AppState {
        assistant: Arc::new(assistant),
        fetcher,
        geocode: Arc::new(config.geocode.clone()),
    })
}

/// Start the HTTP server
///
/// Initializes logging, assembles the pipeline and serves until the
/// process is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    init_tracing(&config.log_filter);
    config.validate()?;

    info!("Starting Help My Health server");
    info!("Bind address: {}", config.bind_addr());
    info!(
        "Trusted domains: {}",
        config.assistant.trust.trusted_domains.len()
    );

    let state = build_state(&config)?;
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
