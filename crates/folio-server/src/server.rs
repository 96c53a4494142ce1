//! HTTP server implementation.

use crate::routes;
use crate::state::AppState;
use anyhow::Context;
use tokio::net::TcpListener;

/// The folio API server.
pub struct FolioServer {
    state: AppState,
}

impl FolioServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Bind the configured address and serve until the process is interrupted.
    pub async fn run(self) -> anyhow::Result<()> {
        let addr = self.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        tracing::info!(
            address = %addr,
            token_lifetime_minutes = self.state.tokens.settings().lifetime.num_minutes(),
            "Starting folio API server"
        );

        let app = routes::router(self.state);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")?;

        tracing::info!("folio API server stopped");
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        self.state.config.server.bind_addr()
    }
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

/// Resolve when `signal` fires. A handler that fails to install never
/// resolves, so the server keeps running instead of shutting down at once.
async fn wait_for_shutdown(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(err) = signal.await {
        tracing::error!(
            error = %err,
            "Failed to listen for shutdown signal; serving until the process is killed"
        );
        std::future::pending::<()>().await;
    }
}
