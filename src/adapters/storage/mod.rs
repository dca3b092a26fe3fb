//! Storage Adapters
//!
//! Implementations of the PersistenceGateway port.
//!
//! ## Available Adapters
//!
//! - **JsonFilePersistence** - One JSON file per account on disk
//! - **InMemoryPersistence** - Accounts in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryPersistence, JsonFilePersistence};
//!
//! // Production: file-based storage
//! let storage = JsonFilePersistence::new("./data");
//!
//! // Testing: in-memory storage
//! let storage = InMemoryPersistence::new();
//! ```

mod in_memory;
mod json_file;

pub use in_memory::InMemoryPersistence;
pub use json_file::JsonFilePersistence;
