//! Gateway server command.

use crate::config::resolve_config;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

/// Start the gateway server.
#[derive(Args, Debug)]
pub struct Serve {
    /// Path to gateway.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Bind address (host:port). Defaults to the `[server]` config.
    #[arg(long)]
    pub bind: Option<std::net::SocketAddr>,
}

impl Serve {
    /// Load config, build the relay, and serve until ctrl-c.
    pub async fn run(self) -> Result<()> {
        let config = resolve_config(self.config.as_deref())?;
        let bind = self
            .bind
            .map(|a| a.to_string())
            .unwrap_or_else(|| config.bind_address());

        let handle = gateway::serve(&config, &bind).await?;
        println!("gateway listening on {bind}");

        tokio::signal::ctrl_c().await?;
        tracing::info!("received ctrl-c, shutting down");
        handle.shutdown().await?;
        tracing::info!("gateway shut down");
        Ok(())
    }
}
