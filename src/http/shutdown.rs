//! Termination signal handling.
//!
//! SIGTERM and SIGINT both stop the service at once. In-flight requests are
//! not drained: the orchestrator has already stopped routing traffic here by
//! the time it signals.

use std::io;

/// Wait for SIGTERM or SIGINT (Ctrl+C) and return the signal's name.
#[cfg(unix)]
pub async fn termination_signal() -> io::Result<&'static str> {
    let mut terminate = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;

    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|()| "SIGINT"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

/// Wait for Ctrl+C; SIGTERM does not exist on this platform.
#[cfg(not(unix))]
pub async fn termination_signal() -> io::Result<&'static str> {
    tokio::signal::ctrl_c().await.map(|()| "SIGINT")
}
