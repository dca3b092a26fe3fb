//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("AI provider setup failed: {0}")]
    AiSetup(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Storage quota must be greater than zero")]
    InvalidQuota,

    #[error("Invalid AI request timeout")]
    InvalidTimeout,

    #[error("AI retries exceed maximum allowed (10)")]
    TooManyRetries,

    #[error("AI base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
