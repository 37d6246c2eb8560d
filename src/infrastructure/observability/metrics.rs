//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use uuid::Uuid;

use super::config::MetricsConfig;

const MAX_PATH_LABEL_LEN: usize = 50;

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
    path: String,
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Install the global Prometheus recorder
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            gauge!("basic_api_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);

            tracing::info!("Prometheus metrics initialized at {}", config.path);

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
                path: config.path.clone(),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Create the metrics router at the configured path
pub fn create_metrics_router(metrics: PrometheusMetrics) -> Router {
    let path = metrics.path.clone();

    Router::new()
        .route(&path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request metric
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", sanitize_path(path)),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Authentication events counted by `auth_events_total`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    Login,
    Register,
}

impl AuthEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }
}

/// Record a login or registration outcome
pub fn record_auth_event(event: AuthEvent, success: bool) {
    counter!(
        "auth_events_total",
        "event" => event.as_str(),
        "outcome" => outcome(success)
    )
    .increment(1);
}

/// Record a token validation outcome
pub fn record_token_validation(valid: bool) {
    let outcome = if valid { "valid" } else { "invalid" };
    counter!("token_validations_total", "outcome" => outcome).increment(1);
}

fn outcome(success: bool) -> &'static str {
    if success {
        "success"
    } else {
        "failure"
    }
}

/// Sanitize URL path for metric labels (replace IDs, limit cardinality)
fn sanitize_path(path: &str) -> String {
    let sanitized = path
        .split('/')
        .map(|segment| {
            let is_id = (!segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()))
                || Uuid::parse_str(segment).is_ok();

            if is_id { "{id}" } else { segment }
        })
        .collect::<Vec<_>>()
        .join("/");

    match sanitized.char_indices().nth(MAX_PATH_LABEL_LEN) {
        Some((end, _)) => sanitized[..end].to_string(),
        None => sanitized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_path_uuid() {
        let path = "/api/products/550e8400-e29b-41d4-a716-446655440000";
        assert_eq!(sanitize_path(path), "/api/products/{id}");
    }

    #[test]
    fn test_sanitize_path_numeric_id() {
        assert_eq!(sanitize_path("/api/products/123"), "/api/products/{id}");
        assert_eq!(sanitize_path("/api/users/7/orders"), "/api/users/{id}/orders");
    }

    #[test]
    fn test_sanitize_path_no_id() {
        assert_eq!(sanitize_path("/health"), "/health");
        assert_eq!(sanitize_path("/api/products/search"), "/api/products/search");
    }

    #[test]
    fn test_sanitize_path_truncates_long_paths() {
        let path = "/very/long/path/that/exceeds/the/maximum/allowed/length/for/metrics";
        assert_eq!(sanitize_path(path).chars().count(), MAX_PATH_LABEL_LEN);
    }

    #[test]
    fn test_auth_event_labels() {
        assert_eq!(AuthEvent::Login.as_str(), "login");
        assert_eq!(AuthEvent::Register.as_str(), "register");
        assert_eq!(outcome(true), "success");
        assert_eq!(outcome(false), "failure");
    }
}
