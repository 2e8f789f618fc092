//! Account lifecycle: signup, login, listing and removal.
//!
//! The service is stateless. It owns handles to a storage backend and a
//! credential hasher and applies the account rules on top of them:
//!
//! - one account per email (exact match)
//! - passwords are hashed before anything is written
//! - no outbound value ever carries the real credential hash
//!
//! The duplicate check in [`AccountService::create`] and the write that
//! follows are separate store calls. Backends close that gap themselves
//! (the PostgreSQL unique constraint, the memory store's write lock) by
//! rejecting the second insert with `DuplicateEmail`.

use crate::crypto::CredentialHasher;
use crate::errors::{AccountError, CredentialField};
use crate::models::{Account, AccountSummary, NewAccount};
use crate::observability::metrics::record_account_operation;
use crate::observability::{hash_for_correlation, ErrorCategory};
use crate::repositories::{AccountFilter, AccountStore};
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    hasher: Arc<dyn CredentialHasher>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { store, hasher }
    }

    /// Create an account.
    ///
    /// Inputs are stored as given; no format checks are applied.
    ///
    /// # Errors
    ///
    /// - `DuplicateEmail` if an account already uses `email` (nothing is written)
    /// - `Storage` / `Crypto` on backend or hashing failure
    #[instrument(
        skip_all,
        name = "account.service.create",
        fields(email_hash = %hash_for_correlation(email), outcome)
    )]
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AccountError> {
        let start = Instant::now();
        let result = self.create_inner(username, email, password).await;
        finish("create", &result, start);
        result
    }

    async fn create_inner(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Account, AccountError> {
        let filter = AccountFilter::email(email);
        if self.store.find_one(&filter).await?.is_some() {
            tracing::debug!(target: "account.service", "Signup rejected: email already registered");
            return Err(AccountError::DuplicateEmail(email.to_string()));
        }

        let credential_hash = self.hasher.hash(password)?;

        let account = self
            .store
            .save(NewAccount {
                username: username.to_string(),
                email: email.to_string(),
                credential_hash,
            })
            .await?;

        tracing::info!(target: "account.service", account_id = %account.id, "Account created");
        Ok(account)
    }

    /// Check an email/password pair.
    ///
    /// Both values must be non-blank after trimming; the email is looked up
    /// exactly as given.
    ///
    /// # Errors
    ///
    /// - `InvalidInput(Email)` / `InvalidInput(Password)` for blank fields, email checked first
    /// - `NotFound` if no account uses `email`
    /// - `WrongCredential` if the password does not verify
    #[instrument(
        skip_all,
        name = "account.service.authenticate",
        fields(email_hash = %hash_for_correlation(email), outcome)
    )]
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccountSummary, AccountError> {
        let start = Instant::now();
        let result = self.authenticate_inner(email, password).await;
        finish("authenticate", &result, start);
        result
    }

    async fn authenticate_inner(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AccountSummary, AccountError> {
        if email.trim().is_empty() {
            return Err(AccountError::InvalidInput(CredentialField::Email));
        }
        if password.trim().is_empty() {
            return Err(AccountError::InvalidInput(CredentialField::Password));
        }

        let account = self
            .store
            .find_one(&AccountFilter::email(email))
            .await?
            .ok_or_else(|| AccountError::NotFound(email.to_string()))?;

        if !self.hasher.verify(password, &account.credential_hash)? {
            tracing::debug!(
                target: "account.service",
                account_id = %account.id,
                "Password mismatch"
            );
            return Err(AccountError::WrongCredential);
        }

        Ok(account.summary())
    }

    /// All accounts, each with its credential hash replaced by the redaction marker.
    #[instrument(skip_all, name = "account.service.list_all", fields(count, outcome))]
    pub async fn list_all(&self) -> Result<Vec<Account>, AccountError> {
        let start = Instant::now();
        let result = self
            .store
            .find_all()
            .await
            .map(|accounts| accounts.iter().map(Account::redacted).collect::<Vec<_>>());

        if let Ok(accounts) = &result {
            tracing::Span::current().record("count", accounts.len());
        }
        finish("list", &result, start);
        result
    }

    /// Full record for `email`, credential hash included.
    ///
    /// For in-process callers only; never hand the result to a client as-is.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        self.store.find_one(&AccountFilter::email(email)).await
    }

    /// Delete the account using `email`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no account uses `email`; no delete is issued
    #[instrument(
        skip_all,
        name = "account.service.delete_by_email",
        fields(email_hash = %hash_for_correlation(email), outcome)
    )]
    pub async fn delete_by_email(&self, email: &str) -> Result<(), AccountError> {
        let start = Instant::now();
        let result = self.delete_inner(email).await;
        finish("delete", &result, start);
        result
    }

    async fn delete_inner(&self, email: &str) -> Result<(), AccountError> {
        let filter = AccountFilter::email(email);
        let account = self
            .store
            .find_one(&filter)
            .await?
            .ok_or_else(|| AccountError::NotFound(email.to_string()))?;

        let removed = self.store.remove(&filter).await?;
        if removed == 0 {
            // Deleted by a concurrent request between lookup and remove.
            tracing::warn!(
                target: "account.service",
                account_id = %account.id,
                "Account vanished before delete"
            );
            return Err(AccountError::NotFound(email.to_string()));
        }

        tracing::info!(target: "account.service", account_id = %account.id, "Account deleted");
        Ok(())
    }
}

/// Record outcome on the current span and in metrics.
fn finish<T>(operation: &'static str, result: &Result<T, AccountError>, start: Instant) {
    let status = match result {
        Ok(_) => "success",
        Err(e) => {
            let category = ErrorCategory::from(e);
            if category == ErrorCategory::Internal {
                tracing::error!(
                    target: "account.service",
                    operation,
                    error = %e,
                    "Account operation failed"
                );
            }
            category.as_str()
        }
    };

    tracing::Span::current().record("outcome", status);
    record_account_operation(operation, status, start.elapsed());
}
