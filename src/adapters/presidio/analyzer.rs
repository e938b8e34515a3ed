//! Presidio analyzer detector
//!
//! Sends the text to a Presidio analyzer over REST. The NER model (spaCy,
//! Flair, HuggingFace or stanza) is whatever the analyzer was started with;
//! the configured family and model name are only recorded in logs.

use crate::adapters::{http_client, join_url};
use crate::anonymization::detector::{DetectionRequest, EntityDetector, ModelFamily, GENERIC_PII};
use crate::anonymization::models::DetectedEntity;
use crate::domain::{PiiGuardError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Detector backed by a Presidio analyzer service
pub struct PresidioAnalyzer {
    analyze_url: String,
    client: Client,
    family: ModelFamily,
    model_name: String,
}

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
    language: &'a str,
    score_threshold: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    entities: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    allow_list: &'a [String],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ad_hoc_recognizers: Vec<AdHocRecognizer<'a>>,
}

#[derive(Debug, Serialize)]
struct AdHocRecognizer<'a> {
    name: &'static str,
    supported_language: &'a str,
    supported_entity: &'static str,
    deny_list: &'a [String],
}

#[derive(Debug, Deserialize)]
struct AnalyzerResult {
    entity_type: String,
    start: usize,
    end: usize,
    score: f32,
}

impl PresidioAnalyzer {
    /// Create a client for the analyzer at `analyzer_url`
    pub fn new(
        analyzer_url: &str,
        family: ModelFamily,
        model_name: impl Into<String>,
        timeout_seconds: u64,
    ) -> Result<Self> {
        Ok(Self {
            analyze_url: join_url(analyzer_url, "analyze"),
            client: http_client(timeout_seconds)?,
            family,
            model_name: model_name.into(),
        })
    }

    pub fn family(&self) -> ModelFamily {
        self.family
    }

    fn build_body<'a>(&self, request: &'a DetectionRequest) -> AnalyzeRequest<'a> {
        let entities = request.entities.as_ref().map(|wanted| {
            let mut names: Vec<&str> = wanted.iter().map(String::as_str).collect();
            if !request.deny_list.is_empty() && !names.contains(&GENERIC_PII) {
                names.push(GENERIC_PII);
            }
            names
        });

        let ad_hoc_recognizers = if request.deny_list.is_empty() {
            Vec::new()
        } else {
            vec![AdHocRecognizer {
                name: "Deny list recognizer",
                supported_language: &request.language,
                supported_entity: GENERIC_PII,
                deny_list: &request.deny_list,
            }]
        };

        AnalyzeRequest {
            text: &request.text,
            language: &request.language,
            score_threshold: request.score_threshold,
            entities,
            allow_list: &request.allow_list,
            ad_hoc_recognizers,
        }
    }
}

#[async_trait]
impl EntityDetector for PresidioAnalyzer {
    async fn analyze(&self, request: &DetectionRequest) -> Result<Vec<DetectedEntity>> {
        tracing::debug!(
            url = %self.analyze_url,
            family = %self.family,
            model = %self.model_name,
            "Calling Presidio analyzer"
        );

        let response = self
            .client
            .post(&self.analyze_url)
            .json(&self.build_body(request))
            .send()
            .await
            .map_err(|e| {
                PiiGuardError::DetectionUnavailable(format!(
                    "Presidio analyzer at {} is unreachable: {e}",
                    self.analyze_url
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PiiGuardError::DetectionUnavailable(format!(
                "Presidio analyzer returned {status}: {body}"
            )));
        }

        let results: Vec<AnalyzerResult> = response.json().await.map_err(|e| {
            PiiGuardError::DetectionUnavailable(format!(
                "Invalid response from Presidio analyzer: {e}"
            ))
        })?;

        let entities = results
            .into_iter()
            .map(|r| DetectedEntity::new(r.entity_type, r.start, r.end, r.score))
            .collect();

        // Older analyzers ignore allow_list, so filter again locally
        let mut entities = request.retain_reportable(entities);
        entities.sort_by_key(|e| (e.start, e.end));
        Ok(entities)
    }

    fn name(&self) -> &str {
        self.family.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_body_without_lists() {
        let analyzer =
            PresidioAnalyzer::new("http://localhost:5002", ModelFamily::SpaCy, "en_core_web_lg", 5)
                .unwrap();
        let request = DetectionRequest::new("John Smith");
        let body = serde_json::to_value(analyzer.build_body(&request)).unwrap();

        assert_eq!(body["text"], json!("John Smith"));
        assert_eq!(body["language"], json!("en"));
        assert!(body["score_threshold"].is_number());
        assert!(body.get("entities").is_none());
        assert!(body.get("allow_list").is_none());
        assert!(body.get("ad_hoc_recognizers").is_none());
    }

    #[test]
    fn test_body_with_deny_list_and_filter() {
        let analyzer =
            PresidioAnalyzer::new("http://localhost:5002/", ModelFamily::Flair, "flair", 5)
                .unwrap();
        let request = DetectionRequest::new("John at Acme")
            .with_entities(vec!["PERSON".to_string()])
            .with_allow_list(vec!["John".to_string()])
            .with_deny_list(vec!["Acme".to_string()]);
        let body = serde_json::to_value(analyzer.build_body(&request)).unwrap();

        assert_eq!(body["entities"], json!(["PERSON", "GENERIC_PII"]));
        assert_eq!(body["allow_list"], json!(["John"]));
        assert_eq!(
            body["ad_hoc_recognizers"][0]["supported_entity"],
            json!("GENERIC_PII")
        );
        assert_eq!(body["ad_hoc_recognizers"][0]["deny_list"], json!(["Acme"]));
        assert_eq!(analyzer.analyze_url, "http://localhost:5002/analyze");
    }
}
