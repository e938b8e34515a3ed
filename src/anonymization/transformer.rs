//! Span transformer
//!
//! Rewrites a text given detected spans and an operator. Spans arrive in any
//! order and may overlap; the transformer validates them, keeps a
//! non-overlapping subset, then rebuilds the output in one left-to-right
//! sweep over the original text so no replacement can shift the offsets of
//! a span that has not been processed yet.

use crate::anonymization::anonymizer::anonymize_span;
use crate::anonymization::models::{AnnotatedEntity, AnonymizationResult, DetectedEntity};
use crate::anonymization::operator::Operator;
use crate::domain::{PiiGuardError, Result};
use std::cmp::Ordering;

/// Apply `operator` to every retained span of `text`
///
/// Offsets are character offsets. Overlapping spans are resolved by
/// [`resolve_overlaps`]; the returned entities are ordered by `start`.
///
/// # Errors
///
/// Returns a validation error when a span is empty, reversed, or extends
/// past the end of the text, and propagates operator failures.
///
/// # Example
///
/// ```
/// use piiguard::anonymization::{transform, DetectedEntity, Operator};
///
/// let text = "John Smith lives in Paris.";
/// let entities = vec![DetectedEntity::new("PERSON", 0, 10, 0.9)];
/// let result = transform(text, &entities, &Operator::Replace).unwrap();
/// assert_eq!(result.anonymized_text, "<PERSON> lives in Paris.");
/// ```
pub fn transform(
    text: &str,
    entities: &[DetectedEntity],
    operator: &Operator,
) -> Result<AnonymizationResult> {
    if text.is_empty() || entities.is_empty() {
        return Ok(AnonymizationResult::unchanged(text));
    }

    let offsets = CharOffsets::new(text);
    for entity in entities {
        offsets.validate(entity)?;
    }

    let retained = resolve_overlaps(entities);
    if retained.len() < entities.len() {
        tracing::debug!(
            detected = entities.len(),
            retained = retained.len(),
            "Dropped overlapping spans"
        );
    }

    let mut anonymized = String::with_capacity(text.len());
    let mut annotated = Vec::with_capacity(retained.len());
    let mut cursor = 0;

    for entity in retained {
        let start = offsets.byte(entity.start);
        let end = offsets.byte(entity.end);
        let value = &text[start..end];

        anonymized.push_str(&text[cursor..start]);
        anonymized.push_str(&anonymize_span(operator, &entity.entity_type, value)?);
        annotated.push(AnnotatedEntity::from_detected(entity, value));
        cursor = end;
    }
    anonymized.push_str(&text[cursor..]);

    Ok(AnonymizationResult {
        anonymized_text: anonymized,
        entities: annotated,
    })
}

/// Pick a non-overlapping subset of `entities`, ordered by `start`
///
/// Candidates are taken by score (highest first), then earliest start, then
/// longest span, then entity type; a candidate overlapping any span already
/// taken is dropped.
pub fn resolve_overlaps(entities: &[DetectedEntity]) -> Vec<&DetectedEntity> {
    let mut candidates: Vec<&DetectedEntity> = entities.iter().collect();
    candidates.sort_by(|a, b| priority(a, b));

    let mut accepted: Vec<&DetectedEntity> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if accepted.iter().all(|kept| !kept.overlaps(candidate)) {
            accepted.push(candidate);
        }
    }

    accepted.sort_by_key(|entity| (entity.start, entity.end));
    accepted
}

fn priority(a: &DetectedEntity, b: &DetectedEntity) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.start.cmp(&b.start))
        .then_with(|| b.len().cmp(&a.len()))
        .then_with(|| a.entity_type.cmp(&b.entity_type))
}

/// Character index to byte index table for one text
struct CharOffsets {
    bytes: Vec<usize>,
}

impl CharOffsets {
    fn new(text: &str) -> Self {
        let mut bytes: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        bytes.push(text.len());
        Self { bytes }
    }

    fn char_len(&self) -> usize {
        self.bytes.len() - 1
    }

    fn byte(&self, char_index: usize) -> usize {
        self.bytes[char_index]
    }

    fn validate(&self, entity: &DetectedEntity) -> Result<()> {
        if entity.start >= entity.end || entity.end > self.char_len() {
            return Err(PiiGuardError::Validation(format!(
                "Invalid span [{}, {}) for {} in text of {} characters",
                entity.start,
                entity.end,
                entity.entity_type,
                self.char_len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "John Smith lives in Paris.";

    fn person() -> DetectedEntity {
        DetectedEntity::new("PERSON", 0, 10, 0.9)
    }

    #[test]
    fn test_replace_single_entity() {
        let result = transform(TEXT, &[person()], &Operator::Replace).unwrap();
        assert_eq!(result.anonymized_text, "<PERSON> lives in Paris.");
        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.entities[0].text, "John Smith");
    }

    #[test]
    fn test_no_entities_returns_input() {
        let result = transform(TEXT, &[], &Operator::Replace).unwrap();
        assert_eq!(result.anonymized_text, TEXT);
        assert!(result.entities.is_empty());
    }

    #[test]
    fn test_empty_text_returns_empty() {
        let result = transform("", &[person()], &Operator::Replace).unwrap();
        assert_eq!(result.anonymized_text, "");
        assert!(result.entities.is_empty());
    }

    #[test]
    fn test_highlight_is_byte_identical() {
        let entities = vec![person(), DetectedEntity::new("LOCATION", 20, 25, 0.8)];
        let result = transform(TEXT, &entities, &Operator::Highlight).unwrap();
        assert_eq!(result.anonymized_text, TEXT);
        assert_eq!(result.entities.len(), 2);
        assert_eq!(result.entities[1].text, "Paris");
    }

    #[test]
    fn test_redact_shortens_by_span_lengths() {
        let entities = vec![person(), DetectedEntity::new("LOCATION", 20, 25, 0.8)];
        let result = transform(TEXT, &entities, &Operator::Redact).unwrap();
        assert_eq!(result.anonymized_text, " lives in .");
        assert_eq!(
            result.anonymized_text.chars().count(),
            TEXT.chars().count() - 10 - 5
        );
    }

    #[test]
    fn test_mask_ten_char_span() {
        let text = "Call 0123456789 now";
        let entities = vec![DetectedEntity::new("PHONE_NUMBER", 5, 15, 0.7)];
        let operator = Operator::mask("*", 4).unwrap();
        let result = transform(text, &entities, &operator).unwrap();
        assert_eq!(result.anonymized_text, "Call ****456789 now");
    }

    #[test]
    fn test_hash_is_stable_across_runs() {
        let a = transform(TEXT, &[person()], &Operator::Hash).unwrap();
        let b = transform(TEXT, &[person()], &Operator::Hash).unwrap();
        assert_eq!(a.anonymized_text, b.anonymized_text);
        assert!(a.anonymized_text.ends_with(" lives in Paris."));
    }

    #[test]
    fn test_unsorted_input_is_applied_left_to_right() {
        let entities = vec![DetectedEntity::new("LOCATION", 20, 25, 0.8), person()];
        let result = transform(TEXT, &entities, &Operator::Replace).unwrap();
        assert_eq!(result.anonymized_text, "<PERSON> lives in <LOCATION>.");
        assert_eq!(result.entities[0].entity_type, "PERSON");
        assert_eq!(result.entities[1].entity_type, "LOCATION");
    }

    #[test]
    fn test_overlap_keeps_exactly_one() {
        let entities = vec![
            DetectedEntity::new("PERSON", 0, 5, 0.6),
            DetectedEntity::new("ORGANIZATION", 3, 8, 0.8),
        ];
        let result = transform(TEXT, &entities, &Operator::Replace).unwrap();
        assert_eq!(result.entities.len(), 1);
        assert_eq!(result.entities[0].entity_type, "ORGANIZATION");
        assert_eq!(result.anonymized_text, "Joh<ORGANIZATION>th lives in Paris.");
    }

    #[test]
    fn test_overlap_tie_prefers_earlier_then_longer() {
        let entities = vec![
            DetectedEntity::new("B", 2, 6, 0.5),
            DetectedEntity::new("A", 0, 4, 0.5),
            DetectedEntity::new("C", 0, 6, 0.5),
        ];
        let kept = resolve_overlaps(&entities);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].entity_type, "C");
    }

    #[test]
    fn test_adjacent_spans_both_kept() {
        let entities = vec![
            DetectedEntity::new("FIRST", 0, 4, 0.9),
            DetectedEntity::new("LAST", 4, 10, 0.9),
        ];
        let result = transform(TEXT, &entities, &Operator::Replace).unwrap();
        assert_eq!(result.anonymized_text, "<FIRST><LAST> lives in Paris.");
    }

    #[test]
    fn test_multibyte_offsets_are_characters() {
        let text = "Zoë Müller wohnt in Köln.";
        let entities = vec![
            DetectedEntity::new("PERSON", 0, 10, 0.9),
            DetectedEntity::new("LOCATION", 20, 24, 0.9),
        ];
        let result = transform(text, &entities, &Operator::Replace).unwrap();
        assert_eq!(result.anonymized_text, "<PERSON> wohnt in <LOCATION>.");
        assert_eq!(result.entities[0].text, "Zoë Müller");
        assert_eq!(result.entities[1].text, "Köln");
    }

    #[test]
    fn test_span_past_end_is_validation_error() {
        let entities = vec![DetectedEntity::new("PERSON", 20, 40, 0.9)];
        let err = transform(TEXT, &entities, &Operator::Replace).unwrap_err();
        assert!(matches!(err, PiiGuardError::Validation(_)));
    }

    #[test]
    fn test_empty_span_is_validation_error() {
        let entities = vec![DetectedEntity::new("PERSON", 4, 4, 0.9)];
        assert!(transform(TEXT, &entities, &Operator::Replace).is_err());
    }
}
