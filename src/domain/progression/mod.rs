//! Progression module - the confidence score, streak and the engine that
//! advances them.
//!
//! The engine is pure: it never performs I/O and never holds user state.
//! Persistence and presentation live in the application layer.

mod engine;
mod errors;
mod milestones;
mod score;
mod stats;

pub use engine::{ProgressionEngine, UnknownAlertActionPolicy, ALERT_TOP_UP};
pub use errors::ProgressionError;
pub use milestones::{next_milestone, reached_milestones, StreakMilestone, StreakTier};
pub use score::{recompute_total, ConfidenceScore, SubMetric, TOTAL_CAP};
pub use stats::{
    AccessibleBucket, AccessibleMoney, AccessibleMoneyDelta, FinancialsDelta, InvestmentBucket,
    Investments, InvestmentsDelta, UserStats, WealthSummary,
};
