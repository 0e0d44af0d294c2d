//! HTTP server startup logic.

use std::net::SocketAddr;

use axum::Router;
use axum_server::Handle;

use crate::config::{AppConfig, ConfigError};

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    Address(#[from] ConfigError),

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Start the HTTP server based on configuration.
///
/// Installs the SIGINT/SIGTERM handler and blocks until the server shuts down.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr = config.http.socket_addr()?;
    let handle = Handle::new();

    shutdown::setup_shutdown_handler(handle.clone());

    serve(app, addr, handle).await
}

/// Bind `addr` and serve `app` until `handle` shuts the server down.
///
/// Bind failures (e.g. the port is already in use) are returned as errors.
/// Once the socket is listening, the port is announced exactly once.
pub async fn serve(app: Router, addr: SocketAddr, handle: Handle) -> Result<(), ServerError> {
    tracing::debug!(%addr, "Binding HTTP server");

    let announce = handle.clone();
    tokio::spawn(async move {
        if let Some(bound) = announce.listening().await {
            tracing::info!(
                port = bound.port(),
                addr = %bound,
                "API is running on port {}",
                bound.port()
            );
        }
    });

    axum_server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
