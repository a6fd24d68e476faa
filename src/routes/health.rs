//! Health and readiness endpoints for container orchestration.
//!
//! Both probes always answer 200 while the process can serve HTTP: the
//! service has no dependencies whose loss should take it out of rotation.

use axum::{extract::State, Json};
use serde::Serialize;

use super::timestamp;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Seconds since startup, fractional
    pub uptime: f64,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// Liveness probe handler.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        uptime: state.uptime_seconds(),
        timestamp: timestamp(),
    })
}

/// Readiness probe handler.
pub async fn ready() -> Json<ReadyResponse> {
    Json(ReadyResponse {
        status: "ready",
        timestamp: timestamp(),
    })
}
