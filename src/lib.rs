//! Knative Hello: a minimal JSON HTTP service for container platform demos.
//!
//! Serves a greeting, a JSON echo, and liveness/readiness probes. The
//! `slack-relay` binary runs the same service but also forwards POST bodies
//! to a Slack incoming webhook.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod notifier;
pub mod routes;
pub mod startup;
pub mod state;

pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
