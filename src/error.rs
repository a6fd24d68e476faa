use std::any::Any;

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Label carried in the `error` field of every 500 response.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{}", .0.body_text())]
    BodyRead(#[from] BytesRejection),

    #[error("{0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("JSON body must be an object or an array, got {0}")]
    NonCompositeBody(&'static str),

    #[error("{0}")]
    Internal(String),
}

/// JSON shape of the generic error handler's response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        internal_error(self.to_string())
    }
}

/// Build the 500 response. Infallible, so it is safe to call from any failure path.
pub fn internal_error(message: String) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody {
            error: INTERNAL_SERVER_ERROR,
            message,
        }),
    )
        .into_response()
}

/// Panic handler for `CatchPanicLayer`: turns a handler panic into the same
/// 500 body as any other failure.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    tracing::error!(panic = %message, "Handler panicked");
    internal_error(message)
}
