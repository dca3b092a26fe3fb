//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary of the PatrimonioPro domain.

mod errors;
mod ids;
mod money;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AlertId, Email, TrainingSessionId};
pub use money::Amount;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
