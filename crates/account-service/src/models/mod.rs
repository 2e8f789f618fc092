//! Account models and the response shapes returned over HTTP.

use common::types::AccountId;
use serde::{Deserialize, Serialize};

/// Placeholder substituted for the credential hash in outbound listings.
pub const REDACTION_MARKER: &str = "***hidden***";

pub const STATUS_SUCCESS: &str = "success";

/// A stored account record.
///
/// `credential_hash` holds the real hash; callers outside the service only
/// ever see [`Account::redacted`] or [`AccountSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub credential_hash: String,
}

impl Account {
    /// Copy of this account with the credential hash replaced by [`REDACTION_MARKER`].
    pub fn redacted(&self) -> Account {
        Account {
            credential_hash: REDACTION_MARKER.to_string(),
            ..self.clone()
        }
    }

    /// Projection without any credential material.
    pub fn summary(&self) -> AccountSummary {
        AccountSummary {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// Account fields handed to storage on creation. Storage assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub credential_hash: String,
}

/// Account with credentials excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub id: AccountId,
    pub username: String,
    pub email: String,
}

/// Entry in the user listing. `password` always carries the redaction marker.
#[derive(Debug, Clone, Serialize)]
pub struct AccountListing {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl From<Account> for AccountListing {
    fn from(account: Account) -> Self {
        let account = account.redacted();
        AccountListing {
            id: account.id,
            username: account.username,
            email: account.email,
            password: account.credential_hash,
        }
    }
}

/// Response for `GET /api/test`.
#[derive(Debug, Clone, Serialize)]
pub struct TestResponse {
    pub message: &'static str,
}

/// Response for `POST /api/signup`.
#[derive(Debug, Clone, Serialize)]
pub struct SignupResponse {
    pub status: &'static str,
    pub message: String,
    pub username: String,
    pub account: AccountSummary,
}

/// Response for `POST /api/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub status: &'static str,
    pub message: String,
    pub user: AccountSummary,
}

/// Response for `GET /api/users`.
#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    pub status: &'static str,
    pub message: String,
    pub users: Vec<AccountListing>,
    pub count: usize,
}

/// Response for `DELETE /api/users/:email`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub status: &'static str,
    pub message: String,
}
