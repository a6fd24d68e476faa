//! HTTP route handlers.
//!
//! Every response is JSON. Unmatched paths, and unsupported methods on known
//! paths, fall through to the catch-all 404 handler. Paths are matched
//! case-insensitively and a trailing slash is ignored. Request logging wraps
//! everything, and a panic anywhere below it is turned into the generic 500.

pub mod health;
pub mod home;
pub mod not_found;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, MethodRouter},
    Router,
};
use chrono::{SecondsFormat, Utc};
use http::header::{HeaderValue, CACHE_CONTROL};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_NO_STORE, MAX_BODY_BYTES};
use crate::error::handle_panic;
use crate::middleware::{fold_path_case, request_log_layer};
use crate::state::AppState;

/// Current time as RFC 3339 UTC with millisecond precision, e.g.
/// `2024-05-01T12:00:00.000Z`.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Unsupported methods on a known path are treated as unknown routes.
fn or_not_found(route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(not_found::not_found)
}

/// Creates the Axum router with all routes and layers.
pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", or_not_found(get(home::index).post(home::submit)))
        .route("/health", or_not_found(get(health::health)))
        .route("/ready", or_not_found(get(health::ready)));

    with_layers(routes, state)
}

/// Attach the fallback, state, and middleware stack to a set of routes.
fn with_layers(routes: Router<AppState>, state: AppState) -> Router {
    let routes = routes
        .fallback(not_found::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ))
        // Panics become the generic 500 JSON body
        .layer(CatchPanicLayer::custom(handle_panic));

    // Router::layer runs after routing, so path rewrites must wrap the
    // routes as a whole service
    let normalized = ServiceBuilder::new()
        .layer(middleware::from_fn(fold_path_case))
        .layer(NormalizePathLayer::trim_trailing_slash())
        .service(routes);

    Router::new()
        .fallback_service(normalized)
        // Request logging - outermost so the span covers everything
        .layer(middleware::from_fn(request_log_layer))
}
