//! Human-readable reports for anonymization results
//!
//! These strings are what hosts show to users, so their wording is stable.

use crate::anonymization::models::AnonymizationResult;
use std::fmt::Write;

/// Shown when detection ran and found nothing
pub const NO_ENTITIES_DETECTED: &str = "No PII entities were detected in the document.";

/// Shown when no result is available yet
pub const NOT_PROCESSED: &str = "No entities detected or text not processed.";

/// Entity report for the `detected_entities` output
///
/// ```
/// use piiguard::anonymization::report::entity_report;
/// use piiguard::anonymization::{transform, DetectedEntity, Operator};
///
/// let result = transform(
///     "John Smith lives in Paris.",
///     &[DetectedEntity::new("PERSON", 0, 10, 0.9)],
///     &Operator::Replace,
/// )
/// .unwrap();
/// assert!(entity_report(Some(&result)).contains("- PERSON: 'John Smith' (confidence: 0.90)"));
/// ```
pub fn entity_report(result: Option<&AnonymizationResult>) -> String {
    let Some(result) = result else {
        return NOT_PROCESSED.to_string();
    };
    if !result.has_entities() {
        return NO_ENTITIES_DETECTED.to_string();
    }

    let mut report = String::from("Detected PII Entities:\n\n");
    for entity in &result.entities {
        let _ = writeln!(
            report,
            "- {}: '{}' (confidence: {:.2})",
            entity.entity_type, entity.text, entity.score
        );
    }
    report
}

/// Statistics block appended when `include_stats` is set
pub fn statistics_block(result: &AnonymizationResult) -> String {
    let mut block = String::from("\n\n--- PII Detection Statistics ---\n");
    if !result.has_entities() {
        block.push_str("No entities found.");
        return block;
    }

    let _ = writeln!(block, "Total entities found: {}", result.entities.len());
    for (entity_type, count) in result.counts_by_type() {
        let _ = writeln!(block, "{entity_type}: {count}");
    }
    block
}

/// Numbered entity listing appended when `return_entities` is set
///
/// Empty when nothing was detected.
pub fn entity_listing(result: &AnonymizationResult) -> String {
    if !result.has_entities() {
        return String::new();
    }

    let mut block = String::from("\n\n--- Detected Entities ---\n");

    for (i, entity) in result.entities.iter().enumerate() {
        let _ = writeln!(
            block,
            "{}. {} ({:.2}): '{}' [position: {}-{}]",
            i + 1,
            entity.entity_type,
            entity.score,
            entity.text,
            entity.start,
            entity.end
        );
    }
    block
}

/// Anonymized text followed by the optional blocks
pub fn processed_text(
    result: &AnonymizationResult,
    include_stats: bool,
    return_entities: bool,
) -> String {
    let mut text = result.anonymized_text.clone();
    if include_stats {
        text.push_str(&statistics_block(result));
    }
    if return_entities {
        text.push_str(&entity_listing(result));
    }
    text
}
