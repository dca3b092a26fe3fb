//! In-Memory Persistence Adapter
//!
//! Stores accounts in memory. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::UserAccount;
use crate::domain::foundation::Email;
use crate::ports::{PersistenceError, PersistenceGateway};

/// In-memory account store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPersistence {
    accounts: Arc<RwLock<HashMap<Email, UserAccount>>>,
}

impl InMemoryPersistence {
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

    /// Clear all stored data (useful for tests).
    pub async fn clear(&self) {
        self.accounts.write().await.clear();
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryPersistence {
    async fn load(&self, email: &Email) -> Result<Option<UserAccount>, PersistenceError> {
        Ok(self.accounts.read().await.get(email).cloned())
    }

    async fn save(&self, account: &UserAccount) -> Result<(), PersistenceError> {
        self.accounts
            .write()
            .await
            .insert(account.email().clone(), account.clone());
        Ok(())
    }

    async fn delete(&self, email: &Email) -> Result<(), PersistenceError> {
        self.accounts.write().await.remove(email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> UserAccount {
        UserAccount::register("Ana", "ana@example.com", "segredo").unwrap()
    }

    #[tokio::test]
    async fn save_then_load_returns_same_account() {
        let storage = InMemoryPersistence::new();
        let account = account();

        storage.save(&account).await.unwrap();

        let loaded = storage.load(account.email()).await.unwrap();
        assert_eq!(loaded, Some(account));
    }

    #[tokio::test]
    async fn load_missing_returns_none() {
        let storage = InMemoryPersistence::new();
        let email = Email::new("nobody@example.com").unwrap();
        assert_eq!(storage.load(&email).await.unwrap(), None);
        assert!(matches!(
            storage.require(&email).await,
            Err(PersistenceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn save_replaces_existing_record() {
        let storage = InMemoryPersistence::new();
        let mut account = account();
        storage.save(&account).await.unwrap();

        account.update_profile("Ana Maria", None).unwrap();
        storage.save(&account).await.unwrap();

        assert_eq!(storage.len().await, 1);
        let loaded = storage.require(account.email()).await.unwrap();
        assert_eq!(loaded.name(), "Ana Maria");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let storage = InMemoryPersistence::new();
        let account = account();
        storage.save(&account).await.unwrap();

        storage.delete(account.email()).await.unwrap();
        storage.delete(account.email()).await.unwrap();
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let storage = InMemoryPersistence::new();
        let other = storage.clone();
        storage.save(&account()).await.unwrap();
        assert_eq!(other.len().await, 1);
        other.clear().await;
        assert!(storage.is_empty().await);
    }
}
