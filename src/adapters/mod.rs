//! Adapters - Implementations of ports for specific technologies.
//!
//! - `ai` - Gemini and mock AIProvider implementations
//! - `advice` - AdviceService implementations
//! - `storage` - PersistenceGateway implementations

pub mod advice;
pub mod ai;
pub mod storage;
