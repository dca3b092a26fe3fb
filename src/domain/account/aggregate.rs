//! UserAccount aggregate.
//!
//! An account exclusively owns its `UserStats`. Stats are replaced only with
//! snapshots returned by the progression engine.

use serde::{Deserialize, Serialize};

use super::credential::CredentialDigest;
use crate::domain::foundation::{Email, ValidationError};
use crate::domain::progression::UserStats;

/// Email of the shared guest identity. Never persisted.
pub const GUEST_EMAIL: &str = "guest@patrimoniopro.com";

/// Display name of the guest identity.
pub const GUEST_NAME: &str = "Visitante Público";

/// User account aggregate.
///
/// # Invariants
///
/// - `name` is non-empty
/// - `email` is a validated, normalized address
/// - the guest account carries no credential
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    name: String,
    email: Email,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    credential: Option<CredentialDigest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    profile_image: Option<String>,
    #[serde(default)]
    stats: UserStats,
}

impl UserAccount {
    /// Registers a new account with fresh stats.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if name, email or secret is blank
    /// - `InvalidFormat` if the email is malformed
    pub fn register(name: &str, email: &str, secret: &str) -> Result<Self, ValidationError> {
        let name = Self::validate_name(name)?;
        let email = Email::new(email)?;
        if secret.is_empty() {
            return Err(ValidationError::empty_field("password"));
        }

        let credential = CredentialDigest::derive(&email, secret);
        Ok(Self {
            name,
            email,
            credential: Some(credential),
            profile_image: None,
            stats: UserStats::initial(),
        })
    }

    /// The shared guest identity with initial stats.
    pub fn guest() -> Self {
        Self {
            name: GUEST_NAME.to_string(),
            email: Email::from_trusted(GUEST_EMAIL),
            credential: None,
            profile_image: None,
            stats: UserStats::initial(),
        }
    }

    /// Reconstitute an account from persistence (no validation).
    pub fn reconstitute(
        name: String,
        email: Email,
        credential: Option<CredentialDigest>,
        profile_image: Option<String>,
        stats: UserStats,
    ) -> Self {
        Self {
            name,
            email,
            credential,
            profile_image,
            stats,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn profile_image(&self) -> Option<&str> {
        self.profile_image.as_deref()
    }

    pub fn stats(&self) -> &UserStats {
        &self.stats
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// True for the shared guest identity.
    pub fn is_guest(&self) -> bool {
        self.email.as_str() == GUEST_EMAIL
    }

    /// Checks a candidate secret against the stored digest.
    ///
    /// Accounts without a credential never match.
    pub fn verify_credential(&self, candidate: &str) -> bool {
        self.credential
            .as_ref()
            .is_some_and(|digest| digest.matches(&self.email, candidate))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the stats snapshot, returning the previous one.
    pub fn replace_stats(&mut self, stats: UserStats) -> UserStats {
        std::mem::replace(&mut self.stats, stats)
    }

    /// Updates display name and profile image.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is blank
    pub fn update_profile(
        &mut self,
        name: &str,
        profile_image: Option<String>,
    ) -> Result<(), ValidationError> {
        self.name = Self::validate_name(name)?;
        self.profile_image = profile_image.filter(|image| !image.trim().is_empty());
        Ok(())
    }

    fn validate_name(name: &str) -> Result<String, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(trimmed.to_string())
    }
}
