//! State machine trait for wizard step enums.
//!
//! Both the training wizard and the investment challenge walk an ordered set
//! of steps. This trait gives them one way to validate a move.

use super::ValidationError;

/// Trait for step enums that represent state machines.
///
/// Implementors define the legal moves; `transition_to` and `is_terminal`
/// come for free.
///
/// ```ignore
/// let next = TrainingStep::Welcome.transition_to(TrainingStep::StartingPoint)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if a move from self to target is legal.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all legal targets from the current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs the move, returning an error if it is not legal.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if the current state has no outgoing transitions.
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}
