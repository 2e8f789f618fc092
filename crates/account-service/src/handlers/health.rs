//! Liveness probe.

/// Health check handler.
///
/// GET /health
///
/// Returns plain "OK" while the process is serving requests. Storage
/// reachability is not checked here.
pub async fn health_check() -> &'static str {
    "OK"
}
