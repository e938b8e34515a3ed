//! Per-span anonymization
//!
//! Each operator turns one matched span into its replacement. Spans are
//! handled independently; deciding which spans survive is the transformer's
//! job.

pub mod encrypt;
pub mod hash;
pub mod mask;

use crate::anonymization::operator::Operator;
use crate::domain::Result;

pub use encrypt::{decrypt_span, encrypt_span, EncryptionKey};
pub use hash::hash_span;
pub use mask::mask_span;

/// Produce the replacement for a single span
///
/// `value` is the exact substring the entity covers in the original text.
pub fn anonymize_span(operator: &Operator, entity_type: &str, value: &str) -> Result<String> {
    let replacement = match operator {
        Operator::Replace => format!("<{entity_type}>"),
        Operator::Redact => String::new(),
        Operator::Mask {
            mask_char,
            number_of_chars,
        } => mask_span(value, *mask_char, *number_of_chars),
        Operator::Hash => hash_span(value),
        Operator::Encrypt { key } => encrypt_span(key, value)?,
        Operator::Highlight => value.to_string(),
    };
    Ok(replacement)
}
