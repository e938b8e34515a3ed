//! Detector selection from configuration

use super::{EntityDetector, ModelFamily, PatternDetector};
use crate::adapters::azure::AzureLanguageDetector;
use crate::adapters::presidio::PresidioAnalyzer;
use crate::config::DetectorConfig;
use crate::domain::{PiiGuardError, Result};
use secrecy::ExposeSecret;
use std::sync::Arc;

/// Build the detector named by `config.model_family`
///
/// # Errors
///
/// - `Configuration` for an unknown model family
/// - `DetectionUnavailable` when the family's endpoint or credentials are
///   missing, or the pattern library cannot be loaded
pub fn create_detector(config: &DetectorConfig) -> Result<Arc<dyn EntityDetector>> {
    let family: ModelFamily = config.model_family.parse()?;

    let detector: Arc<dyn EntityDetector> = match family {
        ModelFamily::Pattern => {
            let detector = match config.pattern_library {
                Some(ref path) => PatternDetector::from_file(path),
                None => PatternDetector::new(),
            }
            .map_err(|e| PiiGuardError::DetectionUnavailable(e.to_string()))?;
            Arc::new(detector)
        }
        ModelFamily::AzureAiLanguage => {
            let key = config
                .ta_key
                .clone()
                .filter(|k| !k.expose_secret().is_empty())
                .ok_or_else(|| {
                    PiiGuardError::DetectionUnavailable(
                        "Azure AI Language requires ta_key and ta_endpoint".to_string(),
                    )
                })?;
            let endpoint = config
                .ta_endpoint
                .as_deref()
                .filter(|e| !e.trim().is_empty())
                .ok_or_else(|| {
                    PiiGuardError::DetectionUnavailable(
                        "Azure AI Language requires ta_key and ta_endpoint".to_string(),
                    )
                })?;
            Arc::new(AzureLanguageDetector::new(
                endpoint,
                key,
                config.timeout_seconds,
            )?)
        }
        ModelFamily::SpaCy | ModelFamily::Flair | ModelFamily::HuggingFace | ModelFamily::Stanza => {
            let analyzer_url = config
                .analyzer_url
                .as_deref()
                .filter(|u| !u.trim().is_empty())
                .ok_or_else(|| {
                    PiiGuardError::DetectionUnavailable(format!(
                        "{family} detection requires detector.analyzer_url"
                    ))
                })?;
            let model_name = if config.model_name.trim().is_empty() {
                family.default_model().to_string()
            } else {
                config.model_name.clone()
            };
            Arc::new(PresidioAnalyzer::new(
                analyzer_url,
                family,
                model_name,
                config.timeout_seconds,
            )?)
        }
    };

    tracing::info!(
        detector = detector.name(),
        model = %config.model_name,
        "Entity detector ready"
    );

    Ok(detector)
}
