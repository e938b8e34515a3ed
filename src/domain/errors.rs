//! Domain error types
//!
//! This module defines the error hierarchy for piiguard. Errors are
//! domain-specific and don't expose third-party types: HTTP client failures
//! are flattened into [`TransportError`] before they leave an adapter.

use thiserror::Error;

/// Main piiguard error type
///
/// Every fallible library operation returns this type. The component layer
/// catches it and turns it into user-visible text.
#[derive(Debug, Error)]
pub enum PiiGuardError {
    /// Unsupported model family or operator, invalid configuration values
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The entity detector could not be initialized or failed to run
    #[error("Detection unavailable: {0}")]
    DetectionUnavailable(String),

    /// Remote service failures
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// Malformed entity spans or inputs
    #[error("Validation error: {0}")]
    Validation(String),

    /// Cipher failures in the encrypt operator
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Remote service errors
///
/// Raised by the HTTP adapters. The display strings are what the remote API
/// component hands back to the host in place of a result.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Server answered with a non-success status
    #[error("API error: {status} - {body}")]
    Status { status: u16, body: String },

    /// Request could not be sent or the connection failed
    #[error("Error calling anonymization API: {0}")]
    Request(String),

    /// Request exceeded the configured timeout
    #[error("Error calling anonymization API: request timed out: {0}")]
    Timeout(String),

    /// Response body could not be read or decoded
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    /// HTTP status code, when the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_decode() {
            TransportError::InvalidResponse(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for PiiGuardError {
    fn from(err: std::io::Error) -> Self {
        PiiGuardError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for PiiGuardError {
    fn from(err: serde_json::Error) -> Self {
        PiiGuardError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for PiiGuardError {
    fn from(err: toml::de::Error) -> Self {
        PiiGuardError::Configuration(format!("TOML parse error: {err}"))
    }
}
