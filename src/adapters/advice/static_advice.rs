//! AdviceService that never calls out. Used when no AI key is configured.

use async_trait::async_trait;

use super::prompts::{CHALLENGE_FALLBACK, DISCOVERY_FALLBACK, OPPORTUNITY_FALLBACK};
use crate::domain::foundation::Amount;
use crate::domain::progression::UserStats;
use crate::ports::AdviceService;

/// Answers every request with the fixed fallback text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticAdviceService;

impl StaticAdviceService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AdviceService for StaticAdviceService {
    async fn fetch_discovery_message(&self, _stats: &UserStats) -> String {
        DISCOVERY_FALLBACK.empty.to_string()
    }

    async fn fetch_opportunity_advice(&self, _stats: &UserStats) -> String {
        OPPORTUNITY_FALLBACK.empty.to_string()
    }

    async fn fetch_challenge_feedback(&self, _choice_label: &str, _amount: Amount) -> String {
        CHALLENGE_FALLBACK.empty.to_string()
    }
}
