//! Anonymization operators
//!
//! An [`Operator`] says what happens to every detected span. Each variant
//! carries only the parameters it needs; host-facing strings are parsed once
//! into this type and an unknown name is a configuration error, never a
//! silent fallback to `replace`.

use crate::anonymization::anonymizer::encrypt::EncryptionKey;
use crate::domain::{PiiGuardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Operator names without parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    Replace,
    Redact,
    Mask,
    Hash,
    Encrypt,
    Highlight,
}

impl OperatorKind {
    /// All operators in the order hosts list them
    pub const ALL: [OperatorKind; 6] = [
        OperatorKind::Replace,
        OperatorKind::Redact,
        OperatorKind::Mask,
        OperatorKind::Hash,
        OperatorKind::Encrypt,
        OperatorKind::Highlight,
    ];

    /// Lowercase operator name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Redact => "redact",
            Self::Mask => "mask",
            Self::Hash => "hash",
            Self::Encrypt => "encrypt",
            Self::Highlight => "highlight",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperatorKind {
    type Err = PiiGuardError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        OperatorKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| {
                let names: Vec<&str> = OperatorKind::ALL.iter().map(|k| k.as_str()).collect();
                PiiGuardError::Configuration(format!(
                    "Unsupported anonymization operator '{}'. Must be one of: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

/// Anonymization operator with its parameters
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    /// Replace the span with `<ENTITY_TYPE>`
    Replace,
    /// Remove the span
    Redact,
    /// Overwrite up to `number_of_chars` leading characters with `mask_char`
    Mask {
        mask_char: char,
        number_of_chars: usize,
    },
    /// Replace the span with its SHA-256 hex digest
    Hash,
    /// Replace the span with a deterministic AES-256-GCM token
    Encrypt { key: EncryptionKey },
    /// Leave the text as is, only report entities
    Highlight,
}

impl Operator {
    /// Build an operator from host-style fields
    ///
    /// `mask_char`, `number_of_chars` and `encrypt_key` are only checked by
    /// the operator that uses them.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown operator name, a mask
    /// character that is not exactly one character, or an empty key.
    pub fn from_parts(
        name: &str,
        mask_char: &str,
        number_of_chars: usize,
        encrypt_key: &str,
    ) -> Result<Self> {
        let operator = match name.parse::<OperatorKind>()? {
            OperatorKind::Replace => Operator::Replace,
            OperatorKind::Redact => Operator::Redact,
            OperatorKind::Mask => Operator::mask(mask_char, number_of_chars)?,
            OperatorKind::Hash => Operator::Hash,
            OperatorKind::Encrypt => Operator::encrypt(encrypt_key)?,
            OperatorKind::Highlight => Operator::Highlight,
        };
        Ok(operator)
    }

    /// Mask operator with a validated mask character
    pub fn mask(mask_char: &str, number_of_chars: usize) -> Result<Self> {
        let mut chars = mask_char.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Operator::Mask {
                mask_char: c,
                number_of_chars,
            }),
            _ => Err(PiiGuardError::Configuration(format!(
                "mask_char must be exactly one character, got {:?}",
                mask_char
            ))),
        }
    }

    /// Encrypt operator keyed by a passphrase
    pub fn encrypt(passphrase: &str) -> Result<Self> {
        Ok(Operator::Encrypt {
            key: EncryptionKey::from_passphrase(passphrase)?,
        })
    }

    /// The parameterless kind of this operator
    pub fn kind(&self) -> OperatorKind {
        match self {
            Self::Replace => OperatorKind::Replace,
            Self::Redact => OperatorKind::Redact,
            Self::Mask { .. } => OperatorKind::Mask,
            Self::Hash => OperatorKind::Hash,
            Self::Encrypt { .. } => OperatorKind::Encrypt,
            Self::Highlight => OperatorKind::Highlight,
        }
    }
}

impl Default for Operator {
    fn default() -> Self {
        Self::Replace
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind().fmt(f)
    }
}
