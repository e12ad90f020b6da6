//! Error types for the invdns client
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for invdns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the invdns client
#[derive(Error, Debug)]
pub enum Error {
    /// Mutually exclusive or missing command-line fields.
    ///
    /// Always raised before any network call is made.
    #[error("Invalid arguments: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The API answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Connection, timeout or other transport-level failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// No descriptor registered for the requested record type
    #[error("Unknown record type: {0}")]
    UnknownRecordType(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an argument validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an HTTP status error
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create an unknown record type error
    pub fn unknown_record_type(dtype: impl Into<String>) -> Self {
        Self::UnknownRecordType(dtype.into())
    }

    /// True for errors detected locally, before anything was sent.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Config(_) | Self::UnknownRecordType(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display_carries_status_and_body() {
        let err = Error::http(404, r#"{"detail": "Not found."}"#);
        assert_eq!(err.to_string(), r#"HTTP 404: {"detail": "Not found."}"#);
    }

    #[test]
    fn test_usage_error_classification() {
        assert!(Error::validation("x").is_usage_error());
        assert!(Error::config("x").is_usage_error());
        assert!(Error::unknown_record_type("NS").is_usage_error());
        assert!(!Error::transport("refused").is_usage_error());
        assert!(!Error::http(500, "").is_usage_error());
    }

    #[test]
    fn test_json_error_converts() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Json(_)));
        assert!(!err.is_usage_error());
    }
}
