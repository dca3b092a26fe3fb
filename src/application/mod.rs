//! Application layer - orchestrates the engine, the wizards and the ports.
//!
//! A [`UserSession`] owns the signed-in account. Every progression change
//! goes through it and is followed by an explicit save.

mod errors;
mod services;
mod session;
mod session_manager;

pub use errors::SessionError;
pub use services::AppServices;
pub use session::{ProgressionEvent, ProgressionEventKind, SaveStatus, UserSession};
pub use session_manager::SessionManager;
