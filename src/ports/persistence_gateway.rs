//! Persistence Gateway Port - Interface for storing user accounts.
//!
//! One record per email address. The guest identity is never handed to a
//! gateway; keeping it out is the caller's job.

use async_trait::async_trait;

use crate::domain::account::UserAccount;
use crate::domain::foundation::{DomainError, Email, ErrorCode};

/// Errors that can occur while loading or saving accounts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    #[error("Account not found: {0}")]
    NotFound(Email),

    #[error("Storage quota exceeded: record needs {needed} bytes, limit is {limit}")]
    QuotaExceeded { needed: u64, limit: u64 },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl PersistenceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PersistenceError::NotFound(_) => ErrorCode::AccountNotFound,
            PersistenceError::QuotaExceeded { .. } => ErrorCode::QuotaExceeded,
            PersistenceError::PermissionDenied(_)
            | PersistenceError::Io(_)
            | PersistenceError::Serialization(_) => ErrorCode::StorageError,
        }
    }
}

impl From<PersistenceError> for DomainError {
    fn from(err: PersistenceError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}

/// Port for loading and saving accounts keyed by email.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Load the account stored under `email`, if any.
    async fn load(&self, email: &Email) -> Result<Option<UserAccount>, PersistenceError>;

    /// Insert or replace the record for `account.email()`.
    async fn save(&self, account: &UserAccount) -> Result<(), PersistenceError>;

    /// Remove the record. Deleting a missing record is not an error.
    async fn delete(&self, email: &Email) -> Result<(), PersistenceError>;

    /// Load an account that must exist.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if no record exists
    async fn require(&self, email: &Email) -> Result<UserAccount, PersistenceError> {
        self.load(email)
            .await?
            .ok_or_else(|| PersistenceError::NotFound(email.clone()))
    }
}
