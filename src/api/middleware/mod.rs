//! API middleware components

pub mod logging;
pub mod metrics;
pub mod user_auth;

use axum::{body::Body, extract::MatchedPath, http::Request};

pub use logging::{logging_middleware, REQUEST_ID_HEADER};
pub use metrics::metrics_middleware;
pub use user_auth::{extract_bearer_token, RequireClaims};

/// Route template when matched, otherwise the raw path
fn request_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}
