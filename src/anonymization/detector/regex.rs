//! Regex-based PII detector

use super::patterns::PatternRegistry;
use super::{char_span, DetectionRequest, EntityDetector};
use crate::anonymization::models::DetectedEntity;
use crate::domain::Result;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

/// Detector backed by the regex pattern library
///
/// Works offline. It only finds structured identifiers (emails, phone
/// numbers, card numbers and the like), never names or places.
#[derive(Clone)]
pub struct PatternDetector {
    pattern_registry: Arc<PatternRegistry>,
}

impl PatternDetector {
    /// Create a new pattern detector with the built-in patterns
    pub fn new() -> Result<Self> {
        Ok(Self::with_registry(PatternRegistry::default_patterns()?))
    }

    /// Load patterns from a TOML file instead of the built-in library
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::with_registry(PatternRegistry::from_file(path)?))
    }

    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            pattern_registry: Arc::new(registry),
        }
    }

    fn detect_in_string(&self, text: &str) -> Vec<DetectedEntity> {
        let mut entities = Vec::new();

        for pattern in self.pattern_registry.all_patterns() {
            for matched in pattern.regex.find_iter(text) {
                if matched.start() == matched.end() {
                    continue;
                }
                let (start, end) = char_span(text, matched.start(), matched.end());
                entities.push(DetectedEntity::new(
                    pattern.entity_type.clone(),
                    start,
                    end,
                    pattern.confidence,
                ));
            }
        }

        entities
    }
}

#[async_trait]
impl EntityDetector for PatternDetector {
    async fn analyze(&self, request: &DetectionRequest) -> Result<Vec<DetectedEntity>> {
        let raw = self.detect_in_string(&request.text);
        Ok(request.finalize(raw))
    }

    fn name(&self) -> &str {
        "pattern"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> PatternDetector {
        PatternDetector::new().unwrap()
    }

    #[tokio::test]
    async fn test_detect_email() {
        let request = DetectionRequest::new("Contact: john.doe@example.com");
        let entities = detector().analyze(&request).await.unwrap();

        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].entity_type, "EMAIL_ADDRESS");
        assert_eq!((entities[0].start, entities[0].end), (9, 29));
    }

    #[tokio::test]
    async fn test_detect_phone() {
        let request = DetectionRequest::new("Call (555) 123-4567");
        let entities = detector().analyze(&request).await.unwrap();
        assert!(entities.iter().any(|e| e.entity_type == "PHONE_NUMBER"));
    }

    #[tokio::test]
    async fn test_threshold_drops_low_confidence() {
        let request =
            DetectionRequest::new("See https://example.org/me or mail a@b.io").with_threshold(0.9);
        let entities = detector().analyze(&request).await.unwrap();
        assert!(entities.iter().all(|e| e.entity_type != "URL"));
        assert!(entities.iter().any(|e| e.entity_type == "EMAIL_ADDRESS"));
    }

    #[tokio::test]
    async fn test_offsets_are_characters() {
        let request = DetectionRequest::new("Müller: mueller@example.de");
        let entities = detector().analyze(&request).await.unwrap();
        let email = entities
            .iter()
            .find(|e| e.entity_type == "EMAIL_ADDRESS")
            .unwrap();
        assert_eq!(email.start, 8);
    }

    #[tokio::test]
    async fn test_allow_and_deny_lists() {
        let request = DetectionRequest::new("Mail support@example.com about Project Falcon")
            .with_allow_list(vec!["support@example.com".to_string()])
            .with_deny_list(vec!["Project Falcon".to_string()]);
        let entities = detector().analyze(&request).await.unwrap();

        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].entity_type, "GENERIC_PII");
        assert_eq!((entities[0].start, entities[0].end), (31, 45));
    }
}
