//! Router tests driven through `tower::ServiceExt::oneshot`.
//!
//! Run with: cargo test --test routes_test

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use knative_hello::config::AppConfig;
use knative_hello::{create_router, AppState};

fn hello_app() -> Router {
    create_router(AppState::new(AppConfig::default()))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_get_root_returns_greeting() {
    let (status, body) = send(hello_app(), get("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Hello World from Knative!");
    assert_eq!(body["version"], "1.0.0");
    assert_eq!(body["environment"], "production");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_get_root_reports_configured_environment() {
    let config = AppConfig {
        environment: "staging".to_string(),
        ..AppConfig::default()
    };
    let (_, body) = send(create_router(AppState::new(config)), get("/")).await;
    assert_eq!(body["environment"], "staging");
}

#[tokio::test]
async fn test_post_root_echoes_body_with_size() {
    let payload = r#"{"name":"knative","tags":["a","b"],"nested":{"n":1.5}}"#;
    let (status, body) = send(hello_app(), post_json("/", payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "POST request received successfully");
    assert_eq!(
        body["receivedData"],
        json!({"name": "knative", "tags": ["a", "b"], "nested": {"n": 1.5}})
    );
    assert_eq!(body["dataSize"], payload.len());
    assert!(body.get("slackNotification").is_none());
}

#[tokio::test]
async fn test_post_root_size_counts_bytes_not_characters() {
    let payload = r#"{"greeting":"héllo ✓"}"#;
    let (_, body) = send(hello_app(), post_json("/", payload)).await;
    assert_eq!(body["dataSize"], payload.len());
}

#[tokio::test]
async fn test_post_root_compacts_whitespace_before_measuring() {
    let (_, body) = send(hello_app(), post_json("/", "[ 1, 2,\n 3 ]")).await;
    assert_eq!(body["receivedData"], json!([1, 2, 3]));
    assert_eq!(body["dataSize"], "[1,2,3]".len());
}

#[tokio::test]
async fn test_post_root_echoes_integral_floats_as_integers() {
    let (status, body) = send(hello_app(), post_json("/", r#"{"a":1.0}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["receivedData"], json!({"a": 1}));
    assert_eq!(body["dataSize"], r#"{"a":1}"#.len());

    let (_, body) = send(hello_app(), post_json("/", r#"{"a":1e2,"b":[2.50,-0.0]}"#)).await;
    assert_eq!(body["receivedData"], json!({"a": 100, "b": [2.5, 0]}));
    assert_eq!(body["dataSize"], r#"{"a":100,"b":[2.5,0]}"#.len());
}

#[tokio::test]
async fn test_post_root_without_json_content_type_echoes_empty_object() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("hello"))
        .unwrap();
    let (status, body) = send(hello_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["receivedData"], json!({}));
    assert_eq!(body["dataSize"], 2);
}

#[tokio::test]
async fn test_post_root_malformed_json_is_internal_error() {
    let (status, body) = send(hello_app(), post_json("/", "{\"message\": ")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_post_root_primitive_json_is_internal_error() {
    let (status, body) = send(hello_app(), post_json("/", "\"just a string\"")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
}

#[tokio::test]
async fn test_post_root_oversized_body_is_internal_error() {
    let big = format!("{{\"data\":\"{}\"}}", "x".repeat(200 * 1024));
    let (status, body) = send(hello_app(), post_json("/", &big)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal Server Error");
}

#[tokio::test]
async fn test_service_keeps_serving_after_error() {
    let app = hello_app();
    let (status, _) = send(app.clone(), post_json("/", "{oops")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, _) = send(app, get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_reports_non_decreasing_uptime() {
    let app = hello_app();

    let (status, first) = send(app.clone(), get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["status"], "healthy");
    let first_uptime = first["uptime"].as_f64().unwrap();
    assert!(first_uptime >= 0.0);

    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let (_, second) = send(app, get("/health")).await;
    assert!(second["uptime"].as_f64().unwrap() >= first_uptime);
}

#[tokio::test]
async fn test_ready_reports_ready() {
    let (status, body) = send(hello_app(), get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let (status, body) = send(hello_app(), get("/missing/page?x=1")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["message"], "Route /missing/page?x=1 not found");
    assert_eq!(body["availableEndpoints"], json!(["/", "/health", "/ready"]));
}

#[tokio::test]
async fn test_trailing_slash_and_case_are_ignored() {
    for uri in ["/health/", "/HEALTH", "/Health/?probe=1", "/ready/", "/READY"] {
        let (status, body) = send(hello_app(), get(uri)).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert!(body["status"] == "healthy" || body["status"] == "ready", "{}", uri);
    }

    let (status, body) = send(hello_app(), post_json("/?Source=CLI", r#"{"x":1}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["receivedData"], json!({"x": 1}));
}

#[tokio::test]
async fn test_not_found_reports_path_as_sent() {
    let (status, body) = send(hello_app(), get("/Missing/Page/?Q=1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Route /Missing/Page/?Q=1 not found");
}

#[tokio::test]
async fn test_unsupported_method_on_known_path_is_not_found() {
    for (method, uri) in [
        (Method::DELETE, "/"),
        (Method::POST, "/health"),
        (Method::PUT, "/ready"),
    ] {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(hello_app(), request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["availableEndpoints"], json!(["/", "/health", "/ready"]));
    }
}

#[tokio::test]
async fn test_responses_are_not_cacheable() {
    let response = hello_app().oneshot(get("/health")).await.unwrap();
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-store"
    );
}
