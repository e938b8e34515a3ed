//! NER model family selection

use crate::domain::{PiiGuardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The NER backend a detector runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelFamily {
    SpaCy,
    Flair,
    HuggingFace,
    Stanza,
    AzureAiLanguage,
    /// Built-in regex library, no external service
    Pattern,
}

impl ModelFamily {
    pub const ALL: [ModelFamily; 6] = [
        ModelFamily::SpaCy,
        ModelFamily::Flair,
        ModelFamily::HuggingFace,
        ModelFamily::Stanza,
        ModelFamily::AzureAiLanguage,
        ModelFamily::Pattern,
    ];

    /// Display name as hosts spell it
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpaCy => "spaCy",
            Self::Flair => "Flair",
            Self::HuggingFace => "HuggingFace",
            Self::Stanza => "stanza",
            Self::AzureAiLanguage => "Azure AI Language",
            Self::Pattern => "pattern",
        }
    }

    /// Model used when none is configured
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::SpaCy => "en_core_web_lg",
            Self::Flair => "flair/ner-english-large",
            Self::HuggingFace => "obi/deid_roberta_i2b2",
            Self::Stanza => "en",
            Self::AzureAiLanguage | Self::Pattern => "",
        }
    }

    /// True for families served by a Presidio-compatible analyzer
    pub fn uses_analyzer(&self) -> bool {
        matches!(
            self,
            Self::SpaCy | Self::Flair | Self::HuggingFace | Self::Stanza
        )
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelFamily {
    type Err = PiiGuardError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        if normalized == "azure" {
            return Ok(Self::AzureAiLanguage);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|family| family.as_str().to_lowercase() == normalized)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|f| f.as_str()).collect();
                PiiGuardError::Configuration(format!(
                    "Unsupported model family '{}'. Must be one of: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}
