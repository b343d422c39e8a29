//! Core error types for taskline-core.
//!
//! Overlap detection itself never fails; these errors cover the ambient
//! layers around it (configuration, task sources, file and JSON handling).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for taskline-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Task source errors (file or HTTP)
    #[error("Task source error: {0}")]
    Source(#[from] SourceError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Errors raised while fetching tasks or projects.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Reading a task file failed
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload was not valid JSON for the expected shape
    #[error("Malformed payload from {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Base URL could not be parsed
    #[error("Invalid API base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    /// Transport-level HTTP failure
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status
    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// An HTML page came back where JSON was expected
    #[error("API endpoint not found: {url} returned HTML instead of JSON")]
    EndpointNotFound { url: String },
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_into_core_error() {
        let err: CoreError = ConfigError::UnknownKey("api.nope".into()).into();
        assert_eq!(err.to_string(), "Configuration error: unknown config key: api.nope");
    }

    #[test]
    fn status_error_message_names_url() {
        let err = SourceError::Status {
            url: "http://localhost/api/tasks".into(),
            status: 401,
        };
        assert!(err.to_string().contains("HTTP 401"));
        assert!(err.to_string().contains("/api/tasks"));
    }
}
