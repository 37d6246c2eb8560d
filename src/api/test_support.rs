//! Helpers for driving the router in handler tests

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::api::router::create_router_with_state;
use crate::api::state::AppState;
use crate::config::AppConfig;

pub const TEST_SECRET: &str = "handler-test-secret-0123456789abcdef";

/// Seeded state with the demo users and products
pub async fn test_state() -> AppState {
    let mut config = AppConfig::default();
    config.jwt.secret_key = Some(TEST_SECRET.to_string());

    crate::create_app_state_with_config(&config).await.unwrap()
}

pub async fn test_app() -> Router {
    create_router_with_state(test_state().await)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<String>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = builder
        .body(body.map(Body::from).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None, token).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body.to_string()), None).await
}

pub async fn post_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body.to_string()), None).await
}
