//! Advice Service Port - motivational and allocation text for the user.
//!
//! Implementations absorb every failure and answer with a fixed fallback
//! string, so callers never see an error from this port.

use async_trait::async_trait;

use crate::domain::foundation::Amount;
use crate::domain::progression::UserStats;

/// Port for the three advice texts shown during progression.
#[async_trait]
pub trait AdviceService: Send + Sync {
    /// Feedback on the user's first financial snapshot (about 3 sentences).
    async fn fetch_discovery_message(&self, stats: &UserStats) -> String;

    /// Short allocation tip for the dashboard (about 150 characters).
    async fn fetch_opportunity_advice(&self, stats: &UserStats) -> String;

    /// Comment on the asset picked in the investment challenge.
    async fn fetch_challenge_feedback(&self, choice_label: &str, amount: Amount) -> String;
}
