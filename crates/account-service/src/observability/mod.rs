//! Observability module for the account service.
//!
//! # Privacy by Default
//!
//! Instrumented functions use `#[instrument(skip_all)]` and record only
//! explicitly allow-listed fields:
//! - **SAFE**: operation names, outcomes, counts
//! - **HASHED**: emails, via [`hash_for_correlation`]
//! - **NEVER**: passwords and credential hashes

pub mod metrics;

use crate::errors::AccountError;
use sha2::{Digest, Sha256};

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars)
///
/// Lets log lines about the same email be grouped without the email itself
/// appearing in the logs. Not suitable for anything secret.
pub fn hash_for_correlation(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    hex::encode(result.get(..4).unwrap_or_default())
}

/// Error categories for metrics labels (bounded cardinality)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected input (blank fields, duplicate email, unreadable body)
    Validation,
    /// Wrong password
    Authentication,
    /// No account for the email
    NotFound,
    /// Storage or hashing failures, timeouts
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::Authentication => "authentication",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl From<&AccountError> for ErrorCategory {
    fn from(err: &AccountError) -> Self {
        match err {
            AccountError::DuplicateEmail(_)
            | AccountError::InvalidInput(_)
            | AccountError::InvalidBody(_) => ErrorCategory::Validation,
            AccountError::WrongCredential => ErrorCategory::Authentication,
            AccountError::NotFound(_) => ErrorCategory::NotFound,
            AccountError::Storage(_) | AccountError::Crypto(_) | AccountError::Timeout => {
                ErrorCategory::Internal
            }
        }
    }
}
