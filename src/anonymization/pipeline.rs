//! Anonymization pipeline
//!
//! Runs the injected detector, then the span transformer. The pipeline holds
//! no global state; every call is independent.

use crate::anonymization::audit::AuditLogger;
use crate::anonymization::detector::{DetectionRequest, EntityDetector};
use crate::anonymization::models::{AnonymizationResult, DetectedEntity};
use crate::anonymization::operator::Operator;
use crate::anonymization::transformer::transform;
use crate::domain::Result;
use crate::log_detection_complete;
use std::sync::Arc;
use std::time::Instant;

/// Detector plus transformer, with an optional audit trail
///
/// # Example
///
/// ```
/// use piiguard::anonymization::{AnonymizationPipeline, DetectionRequest, Operator, PatternDetector};
/// use std::sync::Arc;
///
/// # async fn example() -> piiguard::domain::Result<()> {
/// let pipeline = AnonymizationPipeline::new(Arc::new(PatternDetector::new()?));
/// let request = DetectionRequest::new("Write to jane@example.com");
/// let result = pipeline.process(&request, &Operator::Replace).await?;
/// assert_eq!(result.anonymized_text, "Write to <EMAIL_ADDRESS>");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AnonymizationPipeline {
    detector: Arc<dyn EntityDetector>,
    audit: Option<Arc<AuditLogger>>,
}

impl AnonymizationPipeline {
    pub fn new(detector: Arc<dyn EntityDetector>) -> Self {
        Self {
            detector,
            audit: None,
        }
    }

    /// Record every run in `audit`
    pub fn with_audit(mut self, audit: Arc<AuditLogger>) -> Self {
        self.audit = Some(audit);
        self
    }

    pub fn detector_name(&self) -> &str {
        self.detector.name()
    }

    /// Detect entities without rewriting the text
    pub async fn analyze(&self, request: &DetectionRequest) -> Result<Vec<DetectedEntity>> {
        if request.text.is_empty() {
            return Ok(Vec::new());
        }

        let started = Instant::now();
        let entities = self.detector.analyze(request).await?;
        log_detection_complete!(self.detector.name(), entities.len(), started.elapsed());
        Ok(entities)
    }

    /// Detect entities and rewrite them with `operator`
    ///
    /// Empty text short-circuits to an empty result without calling the
    /// detector.
    pub async fn process(
        &self,
        request: &DetectionRequest,
        operator: &Operator,
    ) -> Result<AnonymizationResult> {
        let started = Instant::now();
        let entities = self.analyze(request).await?;
        let result = transform(&request.text, &entities, operator)?;

        tracing::info!(
            detector = self.detector.name(),
            operator = %operator,
            detected = entities.len(),
            retained = result.entities.len(),
            "Anonymization completed"
        );

        if let Some(ref audit) = self.audit {
            let elapsed_ms = started.elapsed().as_millis() as u64;
            if let Err(e) =
                audit.log_anonymization(self.detector.name(), operator.kind(), &result, elapsed_ms)
            {
                tracing::warn!(error = %e, "Failed to write audit entry");
            }
        }

        Ok(result)
    }
}
