//! Entity and result data models

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A PII span reported by a detector
///
/// `start` and `end` are half-open offsets counted in characters (Unicode
/// scalar values), the unit Presidio and Azure AI Language report in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedEntity {
    /// Entity label, e.g. `PERSON` or `EMAIL_ADDRESS`
    pub entity_type: String,
    /// First character of the span
    pub start: usize,
    /// One past the last character of the span
    pub end: usize,
    /// Confidence score (0.0 - 1.0)
    pub score: f32,
}

impl DetectedEntity {
    /// Create a new detected entity, clamping the score into `[0.0, 1.0]`
    pub fn new(entity_type: impl Into<String>, start: usize, end: usize, score: f32) -> Self {
        Self {
            entity_type: entity_type.into(),
            start,
            end,
            score: score.clamp(0.0, 1.0),
        }
    }

    /// Span length in characters
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True for a zero-length span
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when the two half-open spans share at least one character
    pub fn overlaps(&self, other: &DetectedEntity) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A retained entity together with the text it matched in the original input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedEntity {
    /// Entity label
    pub entity_type: String,
    /// First character of the span in the original text
    pub start: usize,
    /// One past the last character of the span in the original text
    pub end: usize,
    /// Confidence score (0.0 - 1.0)
    pub score: f32,
    /// Matched substring of the original text
    pub text: String,
}

impl AnnotatedEntity {
    /// Attach the matched text to a detected entity
    pub fn from_detected(entity: &DetectedEntity, text: impl Into<String>) -> Self {
        Self {
            entity_type: entity.entity_type.clone(),
            start: entity.start,
            end: entity.end,
            score: entity.score,
            text: text.into(),
        }
    }
}

/// Output of one anonymization run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnonymizationResult {
    /// Text with every retained span rewritten by the operator
    pub anonymized_text: String,
    /// Retained entities ordered by start offset
    pub entities: Vec<AnnotatedEntity>,
}

impl AnonymizationResult {
    /// A result that leaves the text untouched and reports nothing
    pub fn unchanged(text: impl Into<String>) -> Self {
        Self {
            anonymized_text: text.into(),
            entities: Vec::new(),
        }
    }

    /// Check if any PII was found
    pub fn has_entities(&self) -> bool {
        !self.entities.is_empty()
    }

    /// Entity counts per type, in order of first appearance
    pub fn counts_by_type(&self) -> Vec<(String, usize)> {
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entity in &self.entities {
            let count = counts.entry(entity.entity_type.as_str()).or_insert(0);
            if *count == 0 {
                order.push(entity.entity_type.clone());
            }
            *count += 1;
        }
        order
            .into_iter()
            .map(|entity_type| {
                let count = counts[entity_type.as_str()];
                (entity_type, count)
            })
            .collect()
    }
}
