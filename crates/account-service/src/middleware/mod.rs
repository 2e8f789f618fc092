//! HTTP middleware for the account service.

pub mod http_metrics;
pub mod timeout;

pub use http_metrics::http_metrics_middleware;
pub use timeout::timeout_error_body;
