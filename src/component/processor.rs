//! PII processor component
//!
//! Detects PII with the configured model family and rewrites it with the
//! chosen operator. The component keeps the last result so the entity
//! report can be read after the text output.

use super::{parse_term_list, Message, NO_INPUT_TEXT};
use crate::anonymization::audit::AuditLogger;
use crate::anonymization::detector::{
    create_detector, validate_threshold, DetectionRequest, EntityDetector, ModelFamily,
};
use crate::anonymization::models::AnonymizationResult;
use crate::anonymization::operator::Operator;
use crate::anonymization::pipeline::AnonymizationPipeline;
use crate::anonymization::report;
use crate::config::{
    secret_string, DetectorConfig, PiiGuardConfig, SecretString, DEFAULT_ENCRYPT_KEY,
};
use crate::domain::{PiiGuardError, Result};
use crate::log_error_with_context;
use secrecy::ExposeSecret;
use std::path::PathBuf;
use std::sync::Arc;

/// Host-style inputs of the PII processor
#[derive(Debug, Clone)]
pub struct PiiProcessorInputs {
    pub input_text: String,
    pub model_family: String,
    pub model_name: String,
    pub threshold: f32,
    pub language: String,
    pub operator: String,
    pub mask_char: String,
    pub number_of_chars: usize,
    pub encrypt_key: SecretString,
    /// Comma-separated terms never reported
    pub allow_list: String,
    /// Comma-separated terms always reported
    pub deny_list: String,
    /// Comma-separated entity types; empty reports every type
    pub entities: String,
    pub include_stats: bool,
    pub return_entities: bool,
    pub analyzer_url: Option<String>,
    pub ta_key: Option<SecretString>,
    pub ta_endpoint: Option<String>,
    /// Custom pattern library for the `pattern` family
    pub pattern_library: Option<PathBuf>,
    pub timeout_seconds: u64,
}

impl Default for PiiProcessorInputs {
    fn default() -> Self {
        Self::from_config(&PiiGuardConfig::default())
    }
}

impl PiiProcessorInputs {
    /// Inputs pre-filled from a loaded configuration, with no text
    pub fn from_config(config: &PiiGuardConfig) -> Self {
        let detector = &config.detector;
        let anonymizer = &config.anonymizer;
        Self {
            input_text: String::new(),
            model_family: detector.model_family.clone(),
            model_name: detector.model_name.clone(),
            threshold: detector.threshold,
            language: detector.language.clone(),
            operator: anonymizer.operator.clone(),
            mask_char: anonymizer.mask_char.clone(),
            number_of_chars: anonymizer.number_of_chars,
            encrypt_key: anonymizer.encrypt_key.clone(),
            allow_list: detector.allow_list.join(","),
            deny_list: detector.deny_list.join(","),
            entities: detector.entities.join(","),
            include_stats: false,
            return_entities: false,
            analyzer_url: detector.analyzer_url.clone(),
            ta_key: detector.ta_key.clone(),
            ta_endpoint: detector.ta_endpoint.clone(),
            pattern_library: detector.pattern_library.clone(),
            timeout_seconds: detector.timeout_seconds,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.input_text = text.into();
        self
    }

    /// Build the operator named by `operator`
    pub fn build_operator(&self) -> Result<Operator> {
        let key = self.encrypt_key.expose_secret();
        let key = if key.is_empty() {
            DEFAULT_ENCRYPT_KEY
        } else {
            key.as_ref()
        };
        Operator::from_parts(&self.operator, &self.mask_char, self.number_of_chars, key)
    }

    pub fn detection_request(&self) -> DetectionRequest {
        DetectionRequest::new(self.input_text.clone())
            .with_language(self.language.clone())
            .with_threshold(self.threshold)
            .with_allow_list(parse_term_list(&self.allow_list))
            .with_deny_list(parse_term_list(&self.deny_list))
            .with_entities(parse_term_list(&self.entities))
    }

    pub fn detector_config(&self) -> DetectorConfig {
        DetectorConfig {
            model_family: self.model_family.clone(),
            model_name: self.model_name.clone(),
            threshold: self.threshold,
            language: self.language.clone(),
            analyzer_url: self.analyzer_url.clone(),
            ta_key: self.ta_key.clone(),
            ta_endpoint: self.ta_endpoint.clone(),
            allow_list: parse_term_list(&self.allow_list),
            deny_list: parse_term_list(&self.deny_list),
            entities: parse_term_list(&self.entities),
            pattern_library: self.pattern_library.clone(),
            timeout_seconds: self.timeout_seconds,
        }
    }

    /// Replace the encrypt passphrase
    pub fn with_encrypt_key(mut self, key: impl Into<String>) -> Self {
        self.encrypt_key = secret_string(key.into());
        self
    }
}

/// Detect-and-anonymize component
pub struct PiiProcessorComponent {
    inputs: PiiProcessorInputs,
    detector: Option<Arc<dyn EntityDetector>>,
    audit: Option<Arc<AuditLogger>>,
    last_result: Option<AnonymizationResult>,
}

impl PiiProcessorComponent {
    pub fn new(inputs: PiiProcessorInputs) -> Self {
        Self {
            inputs,
            detector: None,
            audit: None,
            last_result: None,
        }
    }

    /// Use `detector` instead of building one from the model family
    pub fn with_detector(mut self, detector: Arc<dyn EntityDetector>) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn with_audit(mut self, audit: Arc<AuditLogger>) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn inputs(&self) -> &PiiProcessorInputs {
        &self.inputs
    }

    /// Replace the input text and forget the previous result
    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.inputs.input_text = text.into();
        self.last_result = None;
    }

    /// Last successful result, if any
    pub fn last_result(&self) -> Option<&AnonymizationResult> {
        self.last_result.as_ref()
    }

    /// Run detection and anonymization once per input text
    ///
    /// # Errors
    ///
    /// Configuration errors (threshold, operator, model family), detector
    /// failures and malformed spans.
    pub async fn process(&mut self) -> Result<&AnonymizationResult> {
        let result = match self.last_result.take() {
            Some(result) => result,
            None => self.run().await?,
        };
        Ok(&*self.last_result.insert(result))
    }

    async fn run(&self) -> Result<AnonymizationResult> {
        validate_threshold(self.inputs.threshold)?;
        let operator = self.inputs.build_operator()?;
        let detector = match self.detector {
            Some(ref detector) => Arc::clone(detector),
            None => create_detector(&self.inputs.detector_config())?,
        };

        let mut pipeline = AnonymizationPipeline::new(detector);
        if let Some(ref audit) = self.audit {
            pipeline = pipeline.with_audit(Arc::clone(audit));
        }

        pipeline
            .process(&self.inputs.detection_request(), &operator)
            .await
    }

    /// The `anonymized_text` output
    ///
    /// Appends the statistics and entity blocks when requested. Errors come
    /// back as `Error processing PII: ...`.
    pub async fn anonymized_text(&mut self) -> String {
        if self.inputs.input_text.is_empty() {
            return NO_INPUT_TEXT.to_string();
        }

        let include_stats = self.inputs.include_stats;
        let return_entities = self.inputs.return_entities;
        match self.process().await {
            Ok(result) => report::processed_text(result, include_stats, return_entities),
            Err(e) => {
                log_error_with_context!(e, "PII processing failed");
                format!("Error processing PII: {e}")
            }
        }
    }

    /// The `detected_entities` output, reflecting the last run
    pub fn detected_entities(&self) -> String {
        report::entity_report(self.last_result.as_ref())
    }

    /// The `message_response` output
    pub async fn message_response(&mut self) -> Message {
        if self.inputs.input_text.is_empty() {
            return Message::text(NO_INPUT_TEXT);
        }

        let include_stats = self.inputs.include_stats;
        let return_entities = self.inputs.return_entities;
        match self.process().await {
            Ok(result) => Message::text(report::processed_text(
                result,
                include_stats,
                return_entities,
            )),
            Err(e) => {
                log_error_with_context!(e, "PII processing failed");
                let mut text = format!("Error processing PII: {e}");
                if let Some(hint) = self.model_hint(&e) {
                    text.push_str("\n\n");
                    text.push_str(&hint);
                }
                Message::error(text)
            }
        }
    }

    /// Installation hint for an unavailable spaCy or HuggingFace model
    fn model_hint(&self, error: &PiiGuardError) -> Option<String> {
        if self.detector.is_some() || !matches!(error, PiiGuardError::DetectionUnavailable(_)) {
            return None;
        }
        match self.inputs.model_family.parse::<ModelFamily>().ok()? {
            ModelFamily::SpaCy => Some(format!(
                "It appears there was an issue with the spaCy model. Please ensure the \
                 analyzer has it installed, for example with: python -m spacy download {}",
                self.inputs.model_name
            )),
            ModelFamily::HuggingFace => Some(
                "It appears there was an issue with the HuggingFace model. Please ensure the \
                 analyzer has the required dependencies installed."
                    .to_string(),
            ),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::models::DetectedEntity;
    use crate::component::MessageKind;
    use async_trait::async_trait;

    struct FixedDetector(Vec<DetectedEntity>);

    #[async_trait]
    impl EntityDetector for FixedDetector {
        async fn analyze(&self, request: &DetectionRequest) -> Result<Vec<DetectedEntity>> {
            Ok(request.finalize(self.0.clone()))
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    fn component(text: &str, operator: &str) -> PiiProcessorComponent {
        let mut inputs = PiiProcessorInputs::default().with_text(text);
        inputs.operator = operator.to_string();
        PiiProcessorComponent::new(inputs).with_detector(Arc::new(FixedDetector(vec![
            DetectedEntity::new("PERSON", 0, 10, 0.9),
        ])))
    }

    #[test]
    fn test_defaults_match_host_defaults() {
        let inputs = PiiProcessorInputs::default();
        assert_eq!(inputs.model_family, "spaCy");
        assert_eq!(inputs.model_name, "en_core_web_lg");
        assert_eq!(inputs.threshold, 0.4);
        assert_eq!(inputs.operator, "replace");
        assert_eq!(inputs.mask_char, "*");
        assert_eq!(inputs.number_of_chars, 15);
        assert!(!inputs.include_stats);
        assert!(!inputs.return_entities);
    }

    #[tokio::test]
    async fn test_replace_and_report() {
        let mut component = component("John Smith lives in Paris.", "replace");

        assert_eq!(
            component.detected_entities(),
            "No entities detected or text not processed."
        );
        assert_eq!(
            component.anonymized_text().await,
            "<PERSON> lives in Paris."
        );
        assert_eq!(
            component.detected_entities(),
            "Detected PII Entities:\n\n- PERSON: 'John Smith' (confidence: 0.90)\n"
        );
    }

    #[tokio::test]
    async fn test_empty_input() {
        let mut component = component("", "replace");
        assert_eq!(component.anonymized_text().await, NO_INPUT_TEXT);
        assert_eq!(component.message_response().await, Message::text(NO_INPUT_TEXT));
    }

    #[tokio::test]
    async fn test_unknown_operator_is_error_message() {
        let mut component = component("John Smith lives in Paris.", "shred");
        let message = component.message_response().await;

        assert_eq!(message.kind, MessageKind::Error);
        assert!(message.text.starts_with("Error processing PII: Configuration error:"));
        assert!(component.last_result().is_none());
    }

    #[tokio::test]
    async fn test_allow_list_suppresses_entity() {
        let mut component = component("John Smith lives in Paris.", "replace");
        component.inputs.allow_list = "John Smith, Paris".to_string();

        assert_eq!(
            component.anonymized_text().await,
            "John Smith lives in Paris."
        );
        assert_eq!(
            component.detected_entities(),
            "No PII entities were detected in the document."
        );
    }

    #[tokio::test]
    async fn test_stats_block_appended() {
        let mut component = component("John Smith lives in Paris.", "redact");
        component.inputs.include_stats = true;
        component.inputs.return_entities = true;

        let text = component.anonymized_text().await;
        assert!(text.starts_with(" lives in Paris.\n\n--- PII Detection Statistics ---\n"));
        assert!(text.contains("Total entities found: 1\nPERSON: 1\n"));
        assert!(text.contains("1. PERSON (0.90): 'John Smith' [position: 0-10]"));
    }

    #[tokio::test]
    async fn test_set_input_text_resets_result() {
        let mut component = component("John Smith lives in Paris.", "highlight");
        component.anonymized_text().await;
        assert!(component.last_result().is_some());

        component.set_input_text("Jane Smith");
        assert!(component.last_result().is_none());
    }

    #[tokio::test]
    async fn test_malformed_threshold_rejected() {
        for threshold in [f32::NAN, 5.0, -0.5] {
            let mut component = component("John Smith lives in Paris.", "replace");
            component.inputs.threshold = threshold;

            let message = component.message_response().await;
            assert!(message.is_error(), "threshold {threshold}");
            assert!(message
                .text
                .starts_with("Error processing PII: Configuration error: threshold"));
            assert!(!message.text.contains("lives in Paris"));
            assert!(component.last_result().is_none());
        }
    }

    #[tokio::test]
    async fn test_unavailable_detector_reported() {
        let mut inputs = PiiProcessorInputs::default().with_text("John");
        inputs.model_family = "HuggingFace".to_string();
        inputs.analyzer_url = None;
        let mut component = PiiProcessorComponent::new(inputs);

        let message = component.message_response().await;
        assert!(message.is_error());
        assert!(message.text.contains("Detection unavailable"));
        assert!(message
            .text
            .ends_with("\n\nIt appears there was an issue with the HuggingFace model. Please ensure the analyzer has the required dependencies installed."));
    }

    #[tokio::test]
    async fn test_spacy_hint_names_model() {
        let mut inputs = PiiProcessorInputs::default().with_text("John");
        inputs.analyzer_url = None;
        let mut component = PiiProcessorComponent::new(inputs);

        let message = component.message_response().await;
        assert!(message.is_error());
        assert!(message
            .text
            .ends_with("for example with: python -m spacy download en_core_web_lg"));

        // anonymized_text carries no hint
        assert!(!component.anonymized_text().await.contains("It appears"));
    }

    #[tokio::test]
    async fn test_no_hint_for_configuration_errors() {
        let mut inputs = PiiProcessorInputs::default().with_text("John");
        inputs.operator = "shred".to_string();
        let mut component = PiiProcessorComponent::new(inputs);

        let message = component.message_response().await;
        assert!(!message.text.contains("It appears"));
    }
}
