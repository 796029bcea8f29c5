//! Salesdash dashboard server.
//!
//! Serves the dashboard page and dispatches UI events to the view-state
//! controller over a WebSocket.
//!
//! # Architecture
//!
//! The server consists of:
//! - **Session**: Per-connection controller state (display selection, help dialog)
//! - **Protocol**: Defines client/server message types
//! - **Routes**: HTTP and WebSocket handlers
//! - **Watcher**: Reports dataset changes that need a restart
//!
//! # Features
//!
//! - `embedded-frontend` (default): Embeds the web UI for standalone use

#[cfg(feature = "embedded-frontend")]
pub mod embedded_frontend;
pub mod error;
pub mod protocol;
pub mod routes;
pub mod session;
pub mod watcher;

use std::net::SocketAddr;
use std::sync::Arc;

use salesdash_core::DashboardContext;

pub use error::{ServerError, ServerResult};
pub use protocol::{ClientMessage, ServerMessage};
pub use routes::{AppState, create_router};
pub use session::{DashboardSession, SessionId};
pub use watcher::{DatasetWatcher, FileEvent};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Whether to watch the dataset file for changes.
    pub watch_dataset: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
            watch_dataset: true,
        }
    }
}

impl ServerConfig {
    /// Socket address to listen on.
    pub fn addr(&self) -> ServerResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ServerError::InvalidAddress(format!("{}:{}", self.host, self.port)))
    }
}

/// Serve a dashboard built at startup.
pub async fn serve(context: DashboardContext, config: ServerConfig) -> ServerResult<()> {
    let addr = config.addr()?;
    let context = Arc::new(context);

    // Spawn watcher task and store handle for cleanup
    let watcher_task = match context.source() {
        Some(path) if config.watch_dataset => match DatasetWatcher::new(path) {
            Ok(mut watcher) => Some(tokio::spawn(async move {
                while let Some(event) = watcher.recv().await {
                    match event {
                        FileEvent::Modified(path) => tracing::warn!(
                            "Dataset {} changed on disk; restart the server to load it",
                            path.display()
                        ),
                        FileEvent::Removed(path) => {
                            tracing::warn!("Dataset {} was removed", path.display())
                        }
                    }
                }
            })),
            Err(e) => {
                tracing::warn!("Not watching dataset: {}", e);
                None
            }
        },
        _ => None,
    };

    #[cfg(feature = "embedded-frontend")]
    if !embedded_frontend::is_available() {
        tracing::warn!("Embedded frontend assets are missing; only the API will be usable");
    }

    let state = Arc::new(AppState { context });
    let app = create_router(state);

    tracing::info!("Starting dashboard server at http://{}", addr);

    let listener = bind(addr).await?;

    // Create shutdown signal channel
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    // Handle Ctrl+C for graceful shutdown
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
        }
    });

    // Serve with graceful shutdown
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = shutdown_rx.await;
    });

    server.await?;

    if let Some(task) = watcher_task {
        task.abort();
        let _ = task.await;
    }

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// Bind the listener, keeping the address in the error.
async fn bind(addr: SocketAddr) -> ServerResult<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8050);
        assert!(config.watch_dataset);
        assert_eq!(config.addr().unwrap().port(), 8050);
    }

    #[test]
    fn test_invalid_address() {
        let config = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.addr(), Err(ServerError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn test_bind_port_in_use() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = taken.local_addr().unwrap();

        match bind(addr).await {
            Err(ServerError::Bind { addr: reported, .. }) => assert_eq!(reported, addr),
            other => panic!("expected bind error, got {other:?}"),
        }
    }
}
