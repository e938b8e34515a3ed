//! Remote anonymization API component
//!
//! Forwards the text to an external anonymization service and passes its
//! answer through untouched.

use super::{Message, NO_INPUT_TEXT};
use crate::adapters::presidio::{RemoteAnonymizationClient, RemoteAnonymizationRequest};
use crate::anonymization::detector::validate_threshold;
use crate::config::PiiGuardConfig;
use crate::domain::{Result, TransportError};

/// Host-style inputs of the remote API component
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteApiInputs {
    pub input_text: String,
    pub anonymization_api_url: String,
    pub model_family: String,
    pub model_name: String,
    pub threshold: f32,
    pub timeout_seconds: u64,
}

impl Default for RemoteApiInputs {
    fn default() -> Self {
        Self::from_config(&PiiGuardConfig::default())
    }
}

impl RemoteApiInputs {
    pub fn from_config(config: &PiiGuardConfig) -> Self {
        Self {
            input_text: String::new(),
            anonymization_api_url: config.remote.url.clone(),
            model_family: config.detector.model_family.clone(),
            model_name: config.detector.model_name.clone(),
            threshold: config.detector.threshold,
            timeout_seconds: config.remote.timeout_seconds,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.input_text = text.into();
        self
    }
}

/// Pass-through component for a remote anonymization service
pub struct RemoteApiComponent {
    inputs: RemoteApiInputs,
}

impl RemoteApiComponent {
    pub fn new(inputs: RemoteApiInputs) -> Self {
        Self { inputs }
    }

    pub fn inputs(&self) -> &RemoteApiInputs {
        &self.inputs
    }

    /// The `response` output
    ///
    /// HTTP 200 yields the response body verbatim. Any other outcome yields
    /// an error message describing it; nothing is retried.
    pub async fn process_text(&self) -> Message {
        if self.inputs.input_text.is_empty() {
            return Message::text(NO_INPUT_TEXT);
        }

        match self.call().await {
            Ok(body) => Message::text(body),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    url = %self.inputs.anonymization_api_url,
                    "Remote anonymization failed"
                );
                Message::error(e.to_string())
            }
        }
    }

    async fn call(&self) -> Result<String> {
        validate_threshold(self.inputs.threshold)?;
        let client = RemoteAnonymizationClient::new(
            self.inputs.anonymization_api_url.clone(),
            self.inputs.timeout_seconds,
        )
        .map_err(|e| TransportError::Request(e.to_string()))?;

        let request = RemoteAnonymizationRequest {
            text: self.inputs.input_text.clone(),
            model_family: self.inputs.model_family.clone(),
            model_name: self.inputs.model_name.clone(),
            threshold: self.inputs.threshold,
        };

        Ok(client.anonymize(&request).await?)
    }
}
