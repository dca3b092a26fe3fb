//! AdviceService backed by an AIProvider.

use async_trait::async_trait;
use std::sync::Arc;

use super::prompts::{
    self, Fallback, CHALLENGE_FALLBACK, DISCOVERY_FALLBACK, DISCOVERY_THINKING_BUDGET,
    OPPORTUNITY_FALLBACK, OPPORTUNITY_THINKING_BUDGET,
};
use crate::domain::foundation::Amount;
use crate::domain::progression::UserStats;
use crate::ports::{AIProvider, AdviceService, CompletionRequest};

/// Builds the advice prompts and absorbs every provider failure.
///
/// Empty text yields the first fallback of a pair, a failed call the second.
#[derive(Clone)]
pub struct AiAdviceService {
    provider: Arc<dyn AIProvider>,
}

impl AiAdviceService {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self { provider }
    }

    async fn ask(&self, request: CompletionRequest, fallback: Fallback) -> String {
        let label = request.label.clone().unwrap_or_default();

        match self.provider.complete(request).await {
            Ok(response) => {
                let text = response.content.trim();
                if text.is_empty() {
                    tracing::warn!(label = %label, "advice provider returned empty text, using fallback");
                    fallback.empty.to_string()
                } else {
                    text.to_string()
                }
            }
            Err(err) => {
                tracing::warn!(label = %label, error = %err, "advice provider failed, using fallback");
                fallback.error.to_string()
            }
        }
    }
}

#[async_trait]
impl AdviceService for AiAdviceService {
    async fn fetch_discovery_message(&self, stats: &UserStats) -> String {
        let request = CompletionRequest::new(prompts::discovery_prompt(&stats.summary()))
            .with_thinking_budget(DISCOVERY_THINKING_BUDGET)
            .with_label("discovery_message");
        self.ask(request, DISCOVERY_FALLBACK).await
    }

    async fn fetch_opportunity_advice(&self, stats: &UserStats) -> String {
        let request = CompletionRequest::new(prompts::opportunity_prompt(&stats.summary()))
            .with_thinking_budget(OPPORTUNITY_THINKING_BUDGET)
            .with_label("opportunity_advice");
        self.ask(request, OPPORTUNITY_FALLBACK).await
    }

    async fn fetch_challenge_feedback(&self, choice_label: &str, amount: Amount) -> String {
        let request = CompletionRequest::new(prompts::challenge_prompt(choice_label, amount))
            .with_label("challenge_feedback");
        self.ask(request, CHALLENGE_FALLBACK).await
    }
}
