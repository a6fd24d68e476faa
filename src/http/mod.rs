//! HTTP server module.
//!
//! Plain HTTP listener on the configured port. TLS is expected to be
//! terminated by the platform ingress in front of the service.
//!
//! The server includes:
//! - Immediate exit on SIGTERM/SIGINT (no connection draining)

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
