//! In-process account store.

use crate::errors::AccountError;
use crate::models::{Account, NewAccount};
use crate::repositories::{AccountFilter, AccountStore};
use common::types::AccountId;
use tokio::sync::RwLock;

/// Account store backed by a vector in memory.
///
/// Keeps insertion order and enforces email uniqueness inside the write
/// lock, so concurrent saves for the same email cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<Vec<Account>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_one(&self, filter: &AccountFilter) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.iter().find(|a| filter.matches(a)).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Account>, AccountError> {
        Ok(self.accounts.read().await.clone())
    }

    async fn save(&self, account: NewAccount) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        if accounts.iter().any(|a| a.email == account.email) {
            return Err(AccountError::DuplicateEmail(account.email));
        }

        let stored = Account {
            id: AccountId::new(),
            username: account.username,
            email: account.email,
            credential_hash: account.credential_hash,
        };
        accounts.push(stored.clone());

        Ok(stored)
    }

    async fn remove(&self, filter: &AccountFilter) -> Result<u64, AccountError> {
        let mut accounts = self.accounts.write().await;
        let before = accounts.len();
        accounts.retain(|a| !filter.matches(a));

        Ok((before - accounts.len()) as u64)
    }
}
