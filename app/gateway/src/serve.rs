//! Shared gateway serve entrypoint, used by the binary and the CLI.

use crate::{AppState, GatewayConfig, routes::router};
use anyhow::Result;
use provider::Upstream;
use tokio::sync::oneshot;

/// Handle returned by [`serve`]: holds the bound port and shutdown trigger.
pub struct ServeHandle {
    /// The port the gateway is listening on.
    pub port: u16,
    /// Send a value to trigger graceful shutdown.
    shutdown_tx: Option<oneshot::Sender<()>>,
    /// Join handle for the server task.
    join: Option<tokio::task::JoinHandle<Result<(), std::io::Error>>>,
}

impl ServeHandle {
    /// Base URL of the running gateway on the loopback interface.
    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Trigger graceful shutdown and wait for the server to stop.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(join) = self.join.take() {
            join.await??;
        }
        Ok(())
    }

    /// Wait until the server stops on its own.
    pub async fn wait(mut self) -> Result<()> {
        if let Some(join) = self.join.take() {
            join.await??;
        }
        Ok(())
    }
}

/// Build the provider adapters from `config`, bind, and start serving.
///
/// The server runs in a spawned task; call `handle.shutdown()` to stop it.
pub async fn serve(config: &GatewayConfig, bind: &str) -> Result<ServeHandle> {
    let state = AppState::from_config(config)?;
    serve_with_state(state, bind).await
}

/// Serve prepared state. Tests use this with scripted upstreams.
pub async fn serve_with_state<U: Upstream>(state: AppState<U>, bind: &str) -> Result<ServeHandle> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    let port = listener.local_addr()?.port();
    tracing::info!("gateway listening on {bind} (port {port})");

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                tracing::info!("received shutdown signal");
            })
            .await
    });

    Ok(ServeHandle {
        port,
        shutdown_tx: Some(shutdown_tx),
        join: Some(join),
    })
}
