//! HTTP server startup logic.

use std::future::IntoFuture;
use std::net::SocketAddr;

use axum::Router;

use crate::config::AppConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid listen address: {0}")]
    Address(String),

    #[error("Failed to bind server: {0}")]
    Bind(#[source] std::io::Error),

    #[error("Failed to install signal handler: {0}")]
    Signal(#[source] std::io::Error),

    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),
}

/// Start the HTTP server based on configuration.
///
/// Returns `Ok(())` as soon as a termination signal arrives. The serve future
/// is dropped at that point, so open connections are not drained; they are
/// aborted when the runtime shuts down.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr: SocketAddr = format!("{}:{}", config.http.host, config.http.port)
        .parse()
        .map_err(|e| ServerError::Address(format!("{}:{}: {}", config.http.host, config.http.port, e)))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(ServerError::Bind)?;

    tracing::info!(%addr, port = config.http.port, "Server is running");
    tracing::info!(environment = %config.environment, "Environment");
    tracing::info!("Ready to accept requests");

    tokio::select! {
        result = axum::serve(listener, app).into_future() => result.map_err(ServerError::Server),
        signal = shutdown::termination_signal() => {
            let signal = signal.map_err(ServerError::Signal)?;
            tracing::info!(signal, "Termination signal received, exiting");
            Ok(())
        }
    }
}
