// tests/support/helpers.rs
use super::builders::TestBlog;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use axum::response::Response;
use bitacora::presentation::http::{
    middleware::rate_limit::RateLimitSettings,
    routes::{RouterOptions, build_router},
    state::HttpState,
};
use serde_json::Value;
use std::sync::Arc;

/// Router over the blog's services with rate limiting disabled.
pub fn make_test_router(blog: &TestBlog) -> axum::Router {
    let state = HttpState {
        services: Arc::clone(&blog.services),
    };
    build_router(state, &RouterOptions::default())
}

/// Router with the form routes limited per client IP.
pub fn make_rate_limited_router(blog: &TestBlog, settings: RateLimitSettings) -> axum::Router {
    let state = HttpState {
        services: Arc::clone(&blog.services),
    };
    let options = RouterOptions {
        rate_limit: Some(settings),
        ..RouterOptions::default()
    };
    build_router(state, &options)
}

/// A JSON POST that appears to come from `ip` through a proxy.
pub fn post_json_from(uri: &str, payload: &Value, ip: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header("x-forwarded-for", ip)
        .body(Body::from(payload.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

pub async fn read_json(resp: Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("expected JSON body")
}

/// Assert that a response is an ErrorResponse JSON with the expected status and
/// error string, returning the parsed body for further checks.
pub async fn assert_error_response(
    resp: Response,
    expected_status: StatusCode,
    expected_error: &str,
) -> Value {
    assert_eq!(resp.status(), expected_status);
    let ct = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(
        ct.starts_with("application/json"),
        "unexpected content-type: {ct}"
    );
    let json = read_json(resp).await;
    let err_field = json.get("error").and_then(Value::as_str).unwrap_or("");
    let msg_field = json.get("message").and_then(Value::as_str).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(!msg_field.is_empty(), "expected non-empty message field");
    json
}
