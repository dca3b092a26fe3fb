//! SessionManager - opens sessions for guests and registered accounts.

use std::sync::Arc;

use super::errors::SessionError;
use super::session::UserSession;
use crate::domain::account::UserAccount;
use crate::domain::foundation::Email;
use crate::domain::progression::ProgressionEngine;
use crate::ports::PersistenceGateway;

/// Loads or creates accounts and wraps them in a [`UserSession`].
#[derive(Clone)]
pub struct SessionManager {
    gateway: Arc<dyn PersistenceGateway>,
    engine: ProgressionEngine,
}

impl SessionManager {
    pub fn new(gateway: Arc<dyn PersistenceGateway>, engine: ProgressionEngine) -> Self {
        Self { gateway, engine }
    }

    /// Starts a guest session with fresh stats. Nothing is loaded or saved.
    pub fn sign_in_guest(&self) -> UserSession {
        tracing::info!("guest session started");
        self.session_for(UserAccount::guest())
    }

    /// Reopens a stored account without checking credentials.
    ///
    /// # Errors
    ///
    /// - `Validation` if the email is malformed
    /// - `Persistence(NotFound)` if there is no record
    pub async fn open(&self, email: &str) -> Result<UserSession, SessionError> {
        let email = Email::new(email)?;
        let account = self.gateway.require(&email).await?;
        Ok(self.session_for(account))
    }

    /// Opens a stored account after checking its secret.
    ///
    /// Unknown emails and wrong secrets fail the same way.
    pub async fn sign_in(&self, email: &str, secret: &str) -> Result<UserSession, SessionError> {
        let email = Email::new(email)?;
        let account = self
            .gateway
            .load(&email)
            .await?
            .filter(|account| account.verify_credential(secret))
            .ok_or(SessionError::InvalidCredentials)?;

        tracing::info!(email = %email, "user signed in");
        Ok(self.session_for(account))
    }

    /// Creates and saves a new account.
    ///
    /// # Errors
    ///
    /// - `Validation` if name, email or secret is invalid
    /// - `AccountAlreadyExists` if the email is taken or reserved for guests
    /// - `Persistence` if the first save fails
    pub async fn register(&self, name: &str, email: &str, secret: &str) -> Result<UserSession, SessionError> {
        let account = UserAccount::register(name, email, secret)?;
        let email = account.email().clone();

        if account.is_guest() || self.gateway.load(&email).await?.is_some() {
            return Err(SessionError::AccountAlreadyExists(email));
        }

        self.gateway.save(&account).await?;
        tracing::info!(email = %email, "account registered");
        Ok(self.session_for(account))
    }

    fn session_for(&self, account: UserAccount) -> UserSession {
        UserSession::new(account, self.gateway.clone(), self.engine)
    }
}
