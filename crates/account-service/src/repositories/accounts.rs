//! PostgreSQL account store.
//!
//! Maps to the `accounts` table. Email uniqueness is backed by the
//! `accounts_email_unique` constraint, so two concurrent signups for the same
//! email cannot both be inserted.

use crate::errors::AccountError;
use crate::models::{Account, NewAccount};
use crate::repositories::{AccountFilter, AccountStore};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Row shape of the accounts table
#[derive(Debug, Clone, sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    #[allow(dead_code)] // Selected for ordering, not exposed on the model
    created_at: DateTime<Utc>,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Account {
            id: row.account_id.into(),
            username: row.username,
            email: row.email,
            credential_hash: row.password_hash,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AccountStore for PgAccountStore {
    async fn find_one(&self, filter: &AccountFilter) -> Result<Option<Account>, AccountError> {
        let query = match filter {
            AccountFilter::Id(id) => sqlx::query_as::<_, AccountRow>(
                r#"
                SELECT account_id, username, email, password_hash, created_at
                FROM accounts
                WHERE account_id = $1
                "#,
            )
            .bind(id.as_uuid()),
            AccountFilter::Email(email) => sqlx::query_as::<_, AccountRow>(
                r#"
                SELECT account_id, username, email, password_hash, created_at
                FROM accounts
                WHERE email = $1
                "#,
            )
            .bind(email.clone()),
        };

        let row = query.fetch_optional(&self.pool).await.map_err(|e| {
            AccountError::Storage(format!(
                "Failed to fetch account by {}: {}",
                filter.field_name(),
                e
            ))
        })?;

        Ok(row.map(Account::from))
    }

    async fn find_all(&self) -> Result<Vec<Account>, AccountError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT account_id, username, email, password_hash, created_at
            FROM accounts
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AccountError::Storage(format!("Failed to fetch accounts: {}", e)))?;

        Ok(rows.into_iter().map(Account::from).collect())
    }

    async fn save(&self, account: NewAccount) -> Result<Account, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING account_id, username, email, password_hash, created_at
            "#,
        )
        .bind(&account.username)
        .bind(&account.email)
        .bind(&account.credential_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let unique_violation = e
                .as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false);

            if unique_violation {
                AccountError::DuplicateEmail(account.email.clone())
            } else {
                AccountError::Storage(format!("Failed to create account: {}", e))
            }
        })?;

        Ok(row.into())
    }

    async fn remove(&self, filter: &AccountFilter) -> Result<u64, AccountError> {
        let query = match filter {
            AccountFilter::Id(id) => {
                sqlx::query("DELETE FROM accounts WHERE account_id = $1").bind(id.as_uuid())
            }
            AccountFilter::Email(email) => {
                sqlx::query("DELETE FROM accounts WHERE email = $1").bind(email.clone())
            }
        };

        let result = query.execute(&self.pool).await.map_err(|e| {
            AccountError::Storage(format!(
                "Failed to delete account by {}: {}",
                filter.field_name(),
                e
            ))
        })?;

        Ok(result.rows_affected())
    }
}
