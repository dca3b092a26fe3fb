//! Advice Adapters
//!
//! Implementations of the AdviceService port.
//!
//! - **AiAdviceService** - Prompts an AIProvider, falls back on fixed texts
//! - **StaticAdviceService** - Fixed texts only

mod ai_advice_service;
mod prompts;
mod static_advice;

pub use ai_advice_service::AiAdviceService;
pub use prompts::{Fallback, CHALLENGE_FALLBACK, DISCOVERY_FALLBACK, OPPORTUNITY_FALLBACK};
pub use static_advice::StaticAdviceService;
