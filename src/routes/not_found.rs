//! Catch-all handler for unmatched routes.

use axum::{extract::OriginalUri, http::StatusCode, Json};
use serde::Serialize;

use crate::config::AVAILABLE_ENDPOINTS;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundResponse {
    pub error: &'static str,
    pub message: String,
    pub available_endpoints: [&'static str; 3],
}

/// Fallback for any method/path not matched by the router.
///
/// Reports the URI as the client sent it, before path normalization.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> (StatusCode, Json<NotFoundResponse>) {
    let requested = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            error: "Not Found",
            message: format!("Route {} not found", requested),
            available_endpoints: AVAILABLE_ENDPOINTS,
        }),
    )
}
