//! Account storage.
//!
//! [`AccountStore`] is the seam between the account service and whatever
//! holds the records. Two backends ship with the service:
//!
//! - [`accounts::PgAccountStore`] - PostgreSQL via sqlx
//! - [`memory::MemoryAccountStore`] - in-process, used when no database is
//!   configured and throughout the tests

pub mod accounts;
pub mod memory;

use crate::errors::AccountError;
use crate::models::{Account, NewAccount};
use common::types::AccountId;

/// Field criteria for single-record lookups and removals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountFilter {
    Id(AccountId),
    Email(String),
}

impl AccountFilter {
    pub fn email(email: &str) -> Self {
        AccountFilter::Email(email.to_string())
    }

    /// Name of the field being matched, for logs and metrics.
    pub fn field_name(&self) -> &'static str {
        match self {
            AccountFilter::Id(_) => "id",
            AccountFilter::Email(_) => "email",
        }
    }

    /// Exact-match test against an account.
    pub fn matches(&self, account: &Account) -> bool {
        match self {
            AccountFilter::Id(id) => account.id == *id,
            AccountFilter::Email(email) => account.email == *email,
        }
    }
}

/// Persistence operations the account service relies on.
#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    /// Find the single account matching `filter`.
    async fn find_one(&self, filter: &AccountFilter) -> Result<Option<Account>, AccountError>;

    /// Every stored account, in backend order.
    async fn find_all(&self) -> Result<Vec<Account>, AccountError>;

    /// Persist a new account and return it with its assigned id.
    ///
    /// Backends that enforce email uniqueness return
    /// `AccountError::DuplicateEmail` on conflict.
    async fn save(&self, account: NewAccount) -> Result<Account, AccountError>;

    /// Remove every account matching `filter`, returning how many were removed.
    async fn remove(&self, filter: &AccountFilter) -> Result<u64, AccountError>;
}

/// Fault-injecting store for testing failure paths.
pub mod mock {
    use super::*;
    use crate::repositories::memory::MemoryAccountStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Which store operation should fail.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FaultPoint {
        Every,
        FindOne,
        FindAll,
        Save,
        Remove,
    }

    /// Memory store that returns `AccountError::Storage` at the configured
    /// fault point and delegates everything else.
    pub struct FaultyAccountStore {
        inner: MemoryAccountStore,
        fail_on: FaultPoint,
        call_count: AtomicUsize,
    }

    impl FaultyAccountStore {
        /// Fail every operation.
        pub fn failing() -> Self {
            Self::failing_on(FaultPoint::Every)
        }

        /// Fail only the given operation.
        pub fn failing_on(fail_on: FaultPoint) -> Self {
            Self {
                inner: MemoryAccountStore::new(),
                fail_on,
                call_count: AtomicUsize::new(0),
            }
        }

        /// Underlying store, for seeding and inspecting records.
        pub fn inner(&self) -> &MemoryAccountStore {
            &self.inner
        }

        /// Number of store calls made.
        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        fn check(&self, point: FaultPoint) -> Result<(), AccountError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if self.fail_on == FaultPoint::Every || self.fail_on == point {
                return Err(AccountError::Storage(format!(
                    "Injected fault at {:?}",
                    point
                )));
            }
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl AccountStore for FaultyAccountStore {
        async fn find_one(&self, filter: &AccountFilter) -> Result<Option<Account>, AccountError> {
            self.check(FaultPoint::FindOne)?;
            self.inner.find_one(filter).await
        }

        async fn find_all(&self) -> Result<Vec<Account>, AccountError> {
            self.check(FaultPoint::FindAll)?;
            self.inner.find_all().await
        }

        async fn save(&self, account: NewAccount) -> Result<Account, AccountError> {
            self.check(FaultPoint::Save)?;
            self.inner.save(account).await
        }

        async fn remove(&self, filter: &AccountFilter) -> Result<u64, AccountError> {
            self.check(FaultPoint::Remove)?;
            self.inner.remove(filter).await
        }
    }
}
