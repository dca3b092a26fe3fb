//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `progression` - Confidence score, streak and the progression engine
//! - `alerts` - Dashboard alerts and their action tokens
//! - `account` - User accounts owning a `UserStats` snapshot
//! - `wizard` - Training session and investment challenge step machines

pub mod account;
pub mod alerts;
pub mod foundation;
pub mod progression;
pub mod wizard;
