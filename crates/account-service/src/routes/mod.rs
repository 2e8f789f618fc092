//! HTTP routes for the account service.
//!
//! Defines the Axum router and application state.

use crate::handlers;
use crate::middleware::{http_metrics_middleware, timeout_error_body};
use crate::observability::metrics::normalize_endpoint;
use crate::services::AccountService;
use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::{delete, get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::Span;

pub use crate::observability::metrics::init_metrics_recorder;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account lifecycle operations, wired to the configured store and hasher.
    pub accounts: AccountService,
}

/// Span for one HTTP request.
///
/// Carries the route template instead of the raw URI, so an email in a
/// `/api/users/:email` path never reaches the logs.
fn request_span(request: &Request<Body>) -> Span {
    tracing::debug_span!(
        "request",
        method = %request.method(),
        endpoint = %normalize_endpoint(request.uri().path()),
    )
}

/// Build the application routes.
///
/// - `/api/test` - API smoke test
/// - `/api/signup` - Create account
/// - `/api/login` - Authenticate
/// - `/api/users` - List accounts (credentials redacted)
/// - `/api/users/:email` - Delete account
/// - `/health` - Liveness probe
/// - `/metrics` - Prometheus metrics
///
/// Requests from any origin are allowed (CORS), time out after 30 seconds,
/// and are traced and counted.
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let api_routes = Router::new()
        .route("/api/test", get(handlers::handle_test))
        .route("/api/signup", post(handlers::handle_signup))
        .route("/api/login", post(handlers::handle_login))
        .route("/api/users", get(handlers::handle_list_users))
        .route("/api/users/:email", delete(handlers::handle_delete_user))
        .route("/health", get(handlers::health_check))
        .with_state(state);

    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Layer order (bottom-to-top execution):
    // 1. TimeoutLayer (innermost)
    // 2. timeout_error_body - gives the bare 408 a JSON error body
    // 3. TraceLayer - spans carry the normalized endpoint, never the URI
    // 4. CorsLayer - answers preflight requests before they reach a route
    // 5. http_metrics_middleware (outermost) - records every response
    api_routes
        .merge(metrics_routes)
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(middleware::map_response(timeout_error_body))
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(cors)
        .layer(middleware::from_fn(http_metrics_middleware))
}
