//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PersistenceGateway` - load/save/delete accounts keyed by email
//! - `AdviceService` - advice texts, never failing
//! - `AIProvider` - generative text provider behind the advice service

mod advice_service;
mod ai_provider;
mod persistence_gateway;

pub use advice_service::AdviceService;
pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, TokenUsage,
};
pub use persistence_gateway::{PersistenceError, PersistenceGateway};
