//! Gravity gateway binary entry point.
//!
//! Loads TOML configuration (or the built-in default), builds the provider
//! adapters and relay, and runs the axum server with graceful shutdown on
//! ctrl-c.

use anyhow::Result;
use gravity_gateway::{AppState, GatewayConfig, config::CONFIG_FILE, router};
use std::path::PathBuf;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing from RUST_LOG (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
    let config = GatewayConfig::load_or_default(&config_path)?;

    let state = AppState::from_config(&config)?;
    let app = router(state);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("gateway listening on {bind_address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("gateway shut down");
    Ok(())
}

/// Wait for ctrl-c signal for graceful shutdown.
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    tracing::info!("received shutdown signal");
}
