//! Metrics definitions for the account service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `account_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded:
//! - `operation`: create, authenticate, list, delete
//! - `status`: success or an `ErrorCategory` string
//! - `endpoint`: fixed route templates (emails in paths are collapsed)

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Initialize Prometheus metrics recorder and return the handle
/// for serving metrics via HTTP.
///
/// Must be called before any metrics are recorded. Operation buckets are
/// wider than HTTP defaults because signup and login include a bcrypt hash.
///
/// # Errors
///
/// Returns error if Prometheus recorder fails to install (e.g., already installed).
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("account_http_request".to_string()),
            &[
                0.005, 0.010, 0.025, 0.050, 0.100, 0.200, 0.300, 0.500, 1.000, 2.000,
            ],
        )
        .map_err(|e| format!("Failed to set HTTP request buckets: {e}"))?
        .set_buckets_for_metric(
            Matcher::Prefix("account_operation".to_string()),
            &[
                0.001, 0.005, 0.010, 0.050, 0.100, 0.200, 0.400, 0.800, 1.600,
            ],
        )
        .map_err(|e| format!("Failed to set operation buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

// ============================================================================
// Account Operation Metrics
// ============================================================================

/// Record completion of an account service operation
///
/// Metric: `account_operations_total`, `account_operation_duration_seconds`
/// Labels: `operation`, `status`
pub fn record_account_operation(operation: &'static str, status: &'static str, duration: Duration) {
    histogram!("account_operation_duration_seconds",
        "operation" => operation,
        "status" => status
    )
    .record(duration.as_secs_f64());

    counter!("account_operations_total",
        "operation" => operation,
        "status" => status
    )
    .increment(1);
}

// ============================================================================
// HTTP Request Metrics
// ============================================================================

/// Record HTTP request completion
///
/// Metric: `account_http_requests_total`, `account_http_request_duration_seconds`
/// Labels: `method`, `endpoint`, `status` / `status_code`
///
/// Captures framework-level rejections (400/404/405/415) as well as handler
/// responses.
pub fn record_http_request(method: &str, endpoint: &str, status_code: u16, duration: Duration) {
    let normalized_endpoint = normalize_endpoint(endpoint);
    let status = categorize_status_code(status_code);

    histogram!("account_http_request_duration_seconds",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint.clone(),
        "status" => status
    )
    .record(duration.as_secs_f64());

    counter!("account_http_requests_total",
        "method" => method.to_string(),
        "endpoint" => normalized_endpoint,
        "status_code" => status_code.to_string()
    )
    .increment(1);
}

/// Categorize HTTP status code into success/error/timeout
fn categorize_status_code(status_code: u16) -> &'static str {
    match status_code {
        200..=299 => "success",
        408 | 504 => "timeout",
        _ => "error",
    }
}

/// Collapse path parameters so every email maps to one label value.
pub fn normalize_endpoint(path: &str) -> String {
    match path {
        "/" | "/health" | "/metrics" | "/api/test" | "/api/signup" | "/api/login"
        | "/api/users" => path.to_string(),
        p if p.starts_with("/api/users/") => "/api/users/{email}".to_string(),
        _ => "/other".to_string(),
    }
}
