//! Error types for sampling requests.
//!
//! Every request either succeeds completely or is rejected before any
//! random draw is made. The only failures outside validation come from
//! loading configuration at start-up.

use thiserror::Error;

/// Main error type for the sampling crate.
#[derive(Error, Debug)]
pub enum SamplingError {
    /// A request parameter is malformed or outside its domain.
    #[error("invalid parameter `{parameter}`: {message}")]
    Validation { parameter: String, message: String },

    /// The endpoint or distribution kind is not served.
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// Configuration values are inconsistent.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// I/O errors while reading configuration.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors.
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON serialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for sampling operations.
pub type Result<T> = std::result::Result<T, SamplingError>;

impl SamplingError {
    /// Builds a validation error for `parameter`.
    pub fn validation(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for errors caused by the caller's request.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            SamplingError::Validation { .. } | SamplingError::UnknownEndpoint(_)
        )
    }
}
