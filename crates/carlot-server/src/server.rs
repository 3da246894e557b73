use std::sync::Arc;

use tokio::net::TcpListener;

use crate::backend;
use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::build_router;

/// Carlot web server.
pub struct CarlotServer {
    config: ServerConfig,
}

impl CarlotServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Validate the config, connect the backends, and serve until Ctrl-C.
    pub async fn serve(self) -> ServerResult<()> {
        self.config.validate()?;
        let service = Arc::new(backend::connect(&self.config).await?);
        let app = build_router(service, self.config.static_dir.as_deref());

        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            backend = %self.config.backend,
            "Carlot server listening on {}",
            self.config.bind_addr
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
