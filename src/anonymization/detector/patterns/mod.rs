//! Pattern library for PII detection

use crate::domain::{PiiGuardError, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// Regex patterns for this entity type
    pub patterns: Vec<String>,
    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,
    /// Entity label reported for matches, e.g. `EMAIL_ADDRESS`
    pub entity_type: String,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub regex: Regex,
    pub entity_type: String,
    pub confidence: f32,
}

#[derive(Debug, Deserialize)]
struct PatternLibrary {
    patterns: BTreeMap<String, PatternDefinition>,
}

/// Compiled pattern library
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
}

impl PatternRegistry {
    /// Load a pattern library from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PiiGuardError::Configuration(format!(
                "Failed to read pattern library {}: {e}",
                path.display()
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Create a pattern registry from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary = toml::from_str(content).map_err(|e| {
            PiiGuardError::Configuration(format!("Failed to parse pattern library TOML: {e}"))
        })?;

        let mut patterns = Vec::new();
        for (name, def) in library.patterns {
            if def.entity_type.trim().is_empty() {
                return Err(PiiGuardError::Configuration(format!(
                    "Pattern '{name}' has an empty entity_type"
                )));
            }
            if !(0.0..=1.0).contains(&def.confidence) {
                return Err(PiiGuardError::Configuration(format!(
                    "Pattern '{name}' confidence must be between 0.0 and 1.0, got {}",
                    def.confidence
                )));
            }

            for pattern_str in &def.patterns {
                let regex = Regex::new(pattern_str).map_err(|e| {
                    PiiGuardError::Configuration(format!(
                        "Invalid regex in pattern '{name}': {pattern_str}: {e}"
                    ))
                })?;

                patterns.push(CompiledPattern {
                    regex,
                    entity_type: def.entity_type.clone(),
                    confidence: def.confidence,
                });
            }
        }

        Ok(Self { patterns })
    }

    /// Built-in patterns embedded at compile time
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../../../patterns/pii_patterns.toml");
        Self::from_toml(default_toml)
    }

    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Patterns reporting the given entity type
    pub fn patterns_for(&self, entity_type: &str) -> Vec<&CompiledPattern> {
        self.patterns
            .iter()
            .filter(|p| p.entity_type == entity_type)
            .collect()
    }

    /// Distinct entity types this registry can report
    pub fn entity_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.patterns.iter().map(|p| p.entity_type.as_str()).collect();
        types.sort_unstable();
        types.dedup();
        types
    }
}
