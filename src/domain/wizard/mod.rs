//! Wizard module - the guided flows that feed the progression engine.
//!
//! - `TrainingWizard` collects balances and hands a `TrainingOutcome` over
//! - `ChallengeWizard` walks the bonus allocation challenge

mod challenge;
mod ticket;
mod training;

pub use challenge::{ChallengeAsset, ChallengeStep, ChallengeWizard, RiskLevel, CHALLENGE_BONUS};
pub use ticket::AdviceTicket;
pub use training::{TrainingOutcome, TrainingStep, TrainingWizard};
