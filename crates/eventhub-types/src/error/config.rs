//! Configuration-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating gateway configuration.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// A configured value is out of range or malformed
    #[error("Config validation error for {field}: {message}")]
    ValidationError {
        /// Name of the field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },

    /// No platform data directory could be resolved for the session file
    #[error("Data directory unavailable: {message}")]
    DataDirUnavailable {
        /// Description of why the directory could not be resolved
        message: String,
    },

    /// The underlying HTTP client could not be constructed
    #[error("HTTP client error: {message}")]
    HttpClient {
        /// Description of the builder failure
        message: String,
    },
}

impl ConfigError {
    /// Shorthand for a validation failure on `field`.
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::ValidationError { field: field.to_string(), message: message.into() }
    }
}
