//! JSON body for requests cut off by the timeout layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::errors::AccountError;

/// Replace the empty 408 produced by `TimeoutLayer` with the standard error body.
///
/// Other responses pass through untouched.
pub async fn timeout_error_body(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        tracing::warn!(target: "account.middleware", "Request timed out");
        return AccountError::Timeout.into_response();
    }
    response
}
