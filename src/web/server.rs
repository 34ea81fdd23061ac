//! HTTP Server
//!
//! Binds the listen address and serves the router until Ctrl+C.

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::Result;
use crate::storage::StorageManager;

use super::handlers::AppState;
use super::router::create_router;

/// HTTP server for fileshare
pub struct Server {
    config: Config,
    storage: Arc<StorageManager>,
}

impl Server {
    /// Create a new server with the given config and storage
    pub fn new(config: Config, storage: Arc<StorageManager>) -> Self {
        Self { config, storage }
    }

    /// Serve requests until a shutdown signal arrives
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.listen_addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        let app = create_router(Arc::new(AppState::new(self.storage)));

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

/// Resolve once `signal` fires; never resolve if it could not be installed
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!("Received Ctrl+C, initiating shutdown..."),
        Err(e) => {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
