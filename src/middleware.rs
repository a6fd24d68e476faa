//! Request middleware: logging and path normalization.
//!
//! The logging layer logs method and path as each request arrives (the
//! subscriber stamps the time), then wraps the rest of the request in a span
//! carrying a generated request ID so handler logs can be correlated.
//! Completion is logged with the status code and duration.

use std::time::Instant;

use axum::{
    extract::{OriginalUri, Request},
    http::Uri,
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

/// Middleware that logs the request line and creates a request span.
///
/// This should be the outermost middleware layer so the span wraps
/// all request processing, including other middleware and handlers.
pub async fn request_log_layer(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
        duration_ms = tracing::field::Empty,
    );

    let start = Instant::now();

    async move {
        tracing::info!("{} {}", method, path);

        let response = next.run(request).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        tracing::Span::current().record("duration_ms", duration_ms);
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms,
            "Request completed"
        );

        response
    }
    .instrument(span)
    .await
}

/// Middleware that lowercases the request path so routes match
/// case-insensitively. The query string is left untouched.
///
/// The URI as received is kept in [`OriginalUri`] for handlers that report it.
pub async fn fold_path_case(mut request: Request, next: Next) -> Response {
    if request.extensions().get::<OriginalUri>().is_none() {
        let original = OriginalUri(request.uri().clone());
        request.extensions_mut().insert(original);
    }

    if let Some(folded) = lowercase_path(request.uri()) {
        *request.uri_mut() = folded;
    }

    next.run(request).await
}

/// Returns `None` when the path is already lowercase.
fn lowercase_path(uri: &Uri) -> Option<Uri> {
    let path = uri.path();
    if !path.bytes().any(|b| b.is_ascii_uppercase()) {
        return None;
    }

    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", path.to_ascii_lowercase(), query),
        None => path.to_ascii_lowercase(),
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse().ok()?);
    Uri::from_parts(parts).ok()
}
