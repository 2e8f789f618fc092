use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Login field that was missing or blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialField {
    Email,
    Password,
}

impl fmt::Display for CredentialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialField::Email => f.write_str("email"),
            CredentialField::Password => f.write_str("password"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Email '{0}' already exists!")]
    DuplicateEmail(String),

    #[error("Please enter {0}")]
    InvalidInput(CredentialField),

    #[error("User with email '{0}' not found")]
    NotFound(String),

    #[error("Wrong password! Please try again")]
    WrongCredential,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    /// Request body could not be read as the expected JSON.
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Request timed out")]
    Timeout,
}

impl AccountError {
    /// HTTP status for this failure kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountError::DuplicateEmail(_) => StatusCode::CONFLICT,
            AccountError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AccountError::NotFound(_) => StatusCode::NOT_FOUND,
            AccountError::WrongCredential => StatusCode::UNAUTHORIZED,
            AccountError::Storage(_) | AccountError::Crypto(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AccountError::InvalidBody(rejection) => rejection.status(),
            AccountError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }

    /// Message safe to hand to callers. Internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AccountError::Storage(_) => "An internal storage error occurred".to_string(),
            AccountError::Crypto(_) => "An internal error occurred".to_string(),
            // serde detail can echo submitted values, so only the kind is reported
            AccountError::InvalidBody(rejection) => match rejection {
                JsonRejection::MissingJsonContentType(_) => {
                    "Expected request with `Content-Type: application/json`".to_string()
                }
                JsonRejection::JsonSyntaxError(_) => "Malformed JSON body".to_string(),
                JsonRejection::JsonDataError(_) => {
                    "Request body has the wrong shape".to_string()
                }
                _ => "Failed to read request body".to_string(),
            },
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: "error",
            message: self.public_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}
