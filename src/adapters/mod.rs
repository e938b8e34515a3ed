//! External service integrations for piiguard.
//!
//! - [`presidio`] - Presidio-compatible analyzer (spaCy, Flair, HuggingFace,
//!   stanza) and the remote anonymization service
//! - [`azure`] - Azure AI Language PII recognition
//!
//! Adapters isolate `reqwest` from the rest of the crate. Detector adapters
//! implement [`EntityDetector`](crate::anonymization::detector::EntityDetector)
//! so the pipeline can run against a mock in tests.

pub mod azure;
pub mod presidio;

use crate::domain::{PiiGuardError, Result};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Connect timeout shared by every adapter
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Build an HTTP client with the given request timeout
pub(crate) fn http_client(timeout_seconds: u64) -> Result<Client> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_seconds))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS.min(timeout_seconds)))
        .build()
        .map_err(|e| PiiGuardError::Configuration(format!("Failed to build HTTP client: {e}")))
}

/// Join a base URL and a path without doubling slashes
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:5002/", "/analyze"),
            "http://localhost:5002/analyze"
        );
        assert_eq!(
            join_url("http://localhost:5002", "analyze"),
            "http://localhost:5002/analyze"
        );
    }

    #[test]
    fn test_http_client_builds() {
        assert!(http_client(30).is_ok());
    }
}
