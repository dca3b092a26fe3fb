//! Account module - user identity and the stats it owns.

mod aggregate;
mod credential;

pub use aggregate::{UserAccount, GUEST_EMAIL, GUEST_NAME};
pub use credential::CredentialDigest;
