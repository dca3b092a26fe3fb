//! Progression-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by the progression engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressionError {
    /// The alert action token is unknown and the engine runs in strict mode.
    #[error("Unrecognized alert action: '{0}'")]
    UnrecognizedAlertAction(String),
}

impl ProgressionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ProgressionError::UnrecognizedAlertAction(_) => ErrorCode::UnrecognizedAlertAction,
        }
    }
}

impl From<ProgressionError> for DomainError {
    fn from(err: ProgressionError) -> Self {
        let ProgressionError::UnrecognizedAlertAction(token) = &err;
        DomainError::new(err.code(), err.to_string()).with_detail("action", token.clone())
    }
}
