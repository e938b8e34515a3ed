//! PII detection module
//!
//! Detection sits behind the [`EntityDetector`] trait. The built-in
//! [`PatternDetector`] runs locally; NER-backed detectors live in
//! [`crate::adapters`] and are picked by [`create_detector`].

pub mod factory;
pub mod family;
pub mod patterns;
pub mod regex;

pub use factory::create_detector;
pub use family::ModelFamily;
pub use regex::PatternDetector;

use crate::anonymization::models::DetectedEntity;
use crate::domain::{PiiGuardError, Result};
use async_trait::async_trait;

/// Entity type assigned to deny-list hits
pub const GENERIC_PII: &str = "GENERIC_PII";

/// Default minimum confidence score
pub const DEFAULT_THRESHOLD: f32 = 0.4;

/// Reject a threshold that is not a number in `[0.0, 1.0]`
///
/// NaN fails the range check, so a malformed threshold never reaches a
/// detection pass where it would filter out every entity.
pub fn validate_threshold(threshold: f32) -> Result<()> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(PiiGuardError::Configuration(format!(
            "threshold must be between 0.0 and 1.0, got {threshold}"
        )))
    }
}

/// Trait for PII detection implementations
#[async_trait]
pub trait EntityDetector: Send + Sync {
    /// Detect entities in the request text
    ///
    /// Offsets of the returned entities are character offsets into
    /// `request.text`.
    async fn analyze(&self, request: &DetectionRequest) -> Result<Vec<DetectedEntity>>;

    /// Short name used in logs
    fn name(&self) -> &str;
}

/// Input of one detection pass
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionRequest {
    pub text: String,
    pub language: String,
    pub score_threshold: f32,
    /// Exact terms never reported as PII
    pub allow_list: Vec<String>,
    /// Terms always reported as `GENERIC_PII`
    pub deny_list: Vec<String>,
    /// Restrict results to these entity types
    pub entities: Option<Vec<String>>,
}

impl DetectionRequest {
    /// Request with default language and threshold
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: "en".to_string(),
            score_threshold: DEFAULT_THRESHOLD,
            allow_list: Vec::new(),
            deny_list: Vec::new(),
            entities: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.score_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_allow_list(mut self, allow_list: Vec<String>) -> Self {
        self.allow_list = allow_list;
        self
    }

    pub fn with_deny_list(mut self, deny_list: Vec<String>) -> Self {
        self.deny_list = deny_list;
        self
    }

    /// An empty filter means no filter
    pub fn with_entities(mut self, entities: Vec<String>) -> Self {
        self.entities = if entities.is_empty() {
            None
        } else {
            Some(entities)
        };
        self
    }

    /// Whole-word, case-sensitive occurrences of every deny-list term
    pub fn deny_list_matches(&self) -> Vec<DetectedEntity> {
        let mut found = Vec::new();
        for term in self.deny_list.iter().filter(|t| !t.is_empty()) {
            for (byte_start, matched) in self.text.match_indices(term.as_str()) {
                let byte_end = byte_start + matched.len();
                if is_word_bounded(&self.text, byte_start, byte_end) {
                    let (start, end) = char_span(&self.text, byte_start, byte_end);
                    found.push(DetectedEntity::new(GENERIC_PII, start, end, 1.0));
                }
            }
        }
        found
    }

    /// Drop entities below the threshold, outside the entity filter, or
    /// whose text is on the allow list
    pub fn retain_reportable(&self, entities: Vec<DetectedEntity>) -> Vec<DetectedEntity> {
        entities
            .into_iter()
            .filter(|e| e.score >= self.score_threshold)
            .filter(|e| {
                e.entity_type == GENERIC_PII
                    || self
                        .entities
                        .as_ref()
                        .map_or(true, |wanted| wanted.iter().any(|w| *w == e.entity_type))
            })
            .filter(|e| {
                let value = char_slice(&self.text, e.start, e.end);
                !self.allow_list.iter().any(|allowed| allowed == value)
            })
            .collect()
    }

    /// Add deny-list hits, filter, and order by position
    pub fn finalize(&self, mut entities: Vec<DetectedEntity>) -> Vec<DetectedEntity> {
        entities.extend(self.deny_list_matches());
        let mut entities = self.retain_reportable(entities);
        entities.sort_by(|a, b| {
            (a.start, a.end)
                .cmp(&(b.start, b.end))
                .then_with(|| a.entity_type.cmp(&b.entity_type))
        });
        entities
    }
}

/// Convert a byte range of `text` to a character range
pub(crate) fn char_span(text: &str, byte_start: usize, byte_end: usize) -> (usize, usize) {
    let start = text[..byte_start].chars().count();
    let end = start + text[byte_start..byte_end].chars().count();
    (start, end)
}

/// Substring by character offsets, empty when out of range
pub(crate) fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let mut indices = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()));
    let Some(byte_start) = indices.nth(start) else {
        return "";
    };
    let byte_end = if end > start {
        indices.nth(end - start - 1)
    } else {
        Some(byte_start)
    };
    match byte_end {
        Some(byte_end) => &text[byte_start..byte_end],
        None => "",
    }
}

fn is_word_bounded(text: &str, byte_start: usize, byte_end: usize) -> bool {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let before = text[..byte_start].chars().next_back();
    let after = text[byte_end..].chars().next();
    !before.is_some_and(is_word) && !after.is_some_and(is_word)
}
