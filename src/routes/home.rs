//! Root endpoint handlers: the greeting and the JSON echo.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Number, Value};

use super::timestamp;
use crate::config::{GREETING_MESSAGE, POST_RECEIVED_MESSAGE, SERVICE_VERSION};
use crate::error::AppError;
use crate::notifier::{message_and_channel, NotificationOutcome};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub message: &'static str,
    pub timestamp: String,
    pub version: &'static str,
    pub environment: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EchoResponse {
    pub message: &'static str,
    pub timestamp: String,
    pub received_data: Value,
    /// Byte length of `received_data` serialized as compact JSON
    pub data_size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slack_notification: Option<NotificationOutcome>,
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Json<GreetingResponse> {
    let response = GreetingResponse {
        message: GREETING_MESSAGE,
        timestamp: timestamp(),
        version: SERVICE_VERSION,
        environment: state.config.environment.clone(),
    };

    tracing::debug!(environment = %response.environment, "Sending greeting");
    Json(response)
}

/// `POST /`
///
/// Echoes the JSON body back. When the state carries a notifier the body is
/// also relayed to Slack and the delivery outcome embedded in the response;
/// a failed delivery never changes the status code.
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<EchoResponse>, AppError> {
    let received = parse_json_body(&headers, &body?)?;

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    tracing::info!(
        content_type,
        body = %serde_json::to_string_pretty(&received).unwrap_or_default(),
        "POST request received"
    );

    let slack_notification = match &state.notifier {
        Some(notifier) => {
            let (text, channel) = message_and_channel(&received, notifier.default_channel());
            Some(notifier.notify(&text, &channel).await)
        }
        None => None,
    };

    Ok(Json(EchoResponse {
        message: POST_RECEIVED_MESSAGE,
        timestamp: timestamp(),
        data_size: received.to_string().len(),
        received_data: received,
        slack_notification,
    }))
}

/// Decode a request body the way a strict JSON body parser does.
///
/// Bodies are only decoded when the content type is `application/json`;
/// anything else, and an empty body, yields `{}`. The top-level value must be
/// an object or an array. Integral numbers are canonicalized, see
/// [`canonicalize_numbers`].
pub fn parse_json_body(headers: &HeaderMap, body: &[u8]) -> Result<Value, AppError> {
    if !is_json_content_type(headers) || body.is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    match serde_json::from_slice::<Value>(body)? {
        mut value @ (Value::Object(_) | Value::Array(_)) => {
            canonicalize_numbers(&mut value);
            Ok(value)
        }
        Value::Null => Err(AppError::NonCompositeBody("null")),
        Value::Bool(_) => Err(AppError::NonCompositeBody("a boolean")),
        Value::Number(_) => Err(AppError::NonCompositeBody("a number")),
        Value::String(_) => Err(AppError::NonCompositeBody("a string")),
    }
}

/// Rewrite integral floats (`1.0`, `1e2`, `-0.0`) as integers so the echo
/// serializes them as `1`, `100` and `0`, the canonical JSON form.
pub fn canonicalize_numbers(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            let Some(f) = n.as_f64() else { return };
            if f.fract() != 0.0 {
                return;
            }
            // 2^63 and 2^64 are exact in f64; both bounds are exclusive
            if f >= i64::MIN as f64 && f < i64::MAX as f64 {
                *n = Number::from(f as i64);
            } else if f >= 0.0 && f < u64::MAX as f64 {
                *n = Number::from(f as u64);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(canonicalize_numbers),
        Value::Object(map) => map.values_mut().for_each(canonicalize_numbers),
        _ => {}
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        .unwrap_or(false)
}
