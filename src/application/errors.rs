//! Application-layer error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, Email, ErrorCode, TrainingSessionId, ValidationError};
use crate::domain::progression::ProgressionError;
use crate::ports::PersistenceError;

/// Errors returned by session operations.
///
/// Save failures after an engine operation are not errors; they surface as
/// [`SaveStatus::NotSaved`](super::SaveStatus::NotSaved).
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Progression(#[from] ProgressionError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// A wizard refused the requested step.
    #[error(transparent)]
    Wizard(#[from] DomainError),

    #[error("Account already exists: {0}")]
    AccountAlreadyExists(Email),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Training session {0} was already recorded")]
    TrainingAlreadyRecorded(TrainingSessionId),
}

impl SessionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::Validation(err) => DomainError::from(err.clone()).code,
            SessionError::Progression(err) => err.code(),
            SessionError::Persistence(err) => err.code(),
            SessionError::Wizard(err) => err.code,
            SessionError::AccountAlreadyExists(_) => ErrorCode::AccountAlreadyExists,
            SessionError::InvalidCredentials => ErrorCode::InvalidCredentials,
            SessionError::TrainingAlreadyRecorded(_) => ErrorCode::InvalidStateTransition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_source_error() {
        let err: SessionError = ValidationError::empty_field("name").into();
        assert_eq!(err.code(), ErrorCode::EmptyField);

        let err: SessionError = ProgressionError::UnrecognizedAlertAction("x".into()).into();
        assert_eq!(err.code(), ErrorCode::UnrecognizedAlertAction);

        let err: SessionError = PersistenceError::QuotaExceeded { needed: 10, limit: 5 }.into();
        assert_eq!(err.code(), ErrorCode::QuotaExceeded);

        assert_eq!(SessionError::InvalidCredentials.code(), ErrorCode::InvalidCredentials);
    }

    #[test]
    fn wizard_error_keeps_message() {
        let err: SessionError = DomainError::new(ErrorCode::WizardIncomplete, "still loading").into();
        assert_eq!(err.to_string(), "[WIZARD_INCOMPLETE] still loading");
        assert_eq!(err.code(), ErrorCode::WizardIncomplete);
    }
}
