//! Error types for the health analysis

use thiserror::Error;

/// Result type alias for health analysis operations
pub type Result<T> = std::result::Result<T, HealthError>;

/// Main error type for health analysis operations
///
/// Missing repository data and unavailable external text are not errors: they
/// resolve to zero defaults and fallbacks. Only loading inputs, validating
/// configuration and running analysis tasks can fail.
#[derive(Error, Debug)]
pub enum HealthError {
    #[error("Failed to parse repository snapshot: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Analysis task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}

impl HealthError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
