//! Remote anonymization service client
//!
//! The service runs detection and anonymization on its side. The response
//! body is opaque to piiguard and handed back unchanged.

use crate::adapters::http_client;
use crate::domain::{Result, TransportError};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// JSON body sent to the remote service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteAnonymizationRequest {
    pub text: String,
    pub model_family: String,
    pub model_name: String,
    pub threshold: f32,
}

/// Client for a remote anonymization endpoint
pub struct RemoteAnonymizationClient {
    url: String,
    client: Client,
}

impl RemoteAnonymizationClient {
    /// Create a client posting to `url`
    pub fn new(url: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        Ok(Self {
            url: url.into(),
            client: http_client(timeout_seconds)?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send one request, returning the raw response body on HTTP 200
    ///
    /// A single attempt is made. Any other status, a network failure or a
    /// timeout comes back as a [`TransportError`].
    pub async fn anonymize(
        &self,
        request: &RemoteAnonymizationRequest,
    ) -> std::result::Result<String, TransportError> {
        tracing::debug!(
            url = %self.url,
            model_family = %request.model_family,
            model_name = %request.model_name,
            threshold = request.threshold,
            text_length = request.text.len(),
            "Calling remote anonymization service"
        );

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(TransportError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(TransportError::from)?;

        if status != StatusCode::OK {
            tracing::warn!(status = status.as_u16(), "Remote anonymization service error");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
