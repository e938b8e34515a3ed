//! Configuration schema types
//!
//! Every section has defaults, so an empty file is a valid configuration
//! that detects with spaCy through a local Presidio analyzer and replaces
//! matches with `<ENTITY_TYPE>` placeholders.

use crate::anonymization::detector::ModelFamily;
use crate::anonymization::operator::Operator;
use crate::config::{secret_string, SecretString};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Log level when neither the command line nor the file sets one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Passphrase the original components shipped as their encrypt default
pub const DEFAULT_ENCRYPT_KEY: &str = "WmZq4t7w!z%C&F)J";

/// Main piiguard configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PiiGuardConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Entity detector selection and detection parameters
    #[serde(default)]
    pub detector: DetectorConfig,

    /// Anonymization operator and its parameters
    #[serde(default)]
    pub anonymizer: AnonymizerConfig,

    /// Remote anonymization service
    #[serde(default)]
    pub remote: RemoteConfig,

    /// Audit log of anonymization runs
    #[serde(default)]
    pub audit: AuditConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PiiGuardConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.detector.validate()?;
        self.anonymizer.validate()?;
        self.remote.validate()?;
        self.audit.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Entity detector configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// NER model family (spaCy, Flair, HuggingFace, stanza, Azure AI Language, pattern)
    #[serde(default = "default_model_family")]
    pub model_family: String,

    /// Model name within the family
    #[serde(default = "default_model_name")]
    pub model_name: String,

    /// Minimum confidence score for a detection to be kept
    #[serde(default = "default_threshold")]
    pub threshold: f32,

    /// Language code passed to the detector
    #[serde(default = "default_language")]
    pub language: String,

    /// Presidio analyzer endpoint serving the NER families
    #[serde(default = "default_analyzer_url")]
    pub analyzer_url: Option<String>,

    /// Azure AI Language key
    #[serde(default)]
    pub ta_key: Option<SecretString>,

    /// Azure AI Language endpoint
    #[serde(default)]
    pub ta_endpoint: Option<String>,

    /// Terms never reported as PII
    #[serde(default)]
    pub allow_list: Vec<String>,

    /// Terms always reported as PII (`GENERIC_PII`)
    #[serde(default)]
    pub deny_list: Vec<String>,

    /// Entity types to report; empty means all supported types
    #[serde(default)]
    pub entities: Vec<String>,

    /// Custom pattern library for the `pattern` family
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,

    /// HTTP timeout for remote detectors
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_family: default_model_family(),
            model_name: default_model_name(),
            threshold: default_threshold(),
            language: default_language(),
            analyzer_url: default_analyzer_url(),
            ta_key: None,
            ta_endpoint: None,
            allow_list: Vec::new(),
            deny_list: Vec::new(),
            entities: Vec::new(),
            pattern_library: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl DetectorConfig {
    fn validate(&self) -> Result<(), String> {
        ModelFamily::from_str(&self.model_family).map_err(|e| e.to_string())?;

        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(format!(
                "detector.threshold must be between 0.0 and 1.0, got {}",
                self.threshold
            ));
        }

        if let Some(ref analyzer_url) = self.analyzer_url {
            validate_http_url("detector.analyzer_url", analyzer_url)?;
        }

        if let Some(ref endpoint) = self.ta_endpoint {
            validate_http_url("detector.ta_endpoint", endpoint)?;
        }

        if self.timeout_seconds == 0 {
            return Err("detector.timeout_seconds must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Anonymization operator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizerConfig {
    /// Operator name (replace, redact, mask, hash, encrypt, highlight)
    #[serde(default = "default_operator")]
    pub operator: String,

    /// Character used by the mask operator
    #[serde(default = "default_mask_char")]
    pub mask_char: String,

    /// Maximum number of characters the mask operator replaces per span
    #[serde(default = "default_number_of_chars")]
    pub number_of_chars: usize,

    /// Passphrase for the encrypt operator
    #[serde(default = "default_encrypt_key")]
    pub encrypt_key: SecretString,
}

impl Default for AnonymizerConfig {
    fn default() -> Self {
        Self {
            operator: default_operator(),
            mask_char: default_mask_char(),
            number_of_chars: default_number_of_chars(),
            encrypt_key: default_encrypt_key(),
        }
    }
}

impl AnonymizerConfig {
    /// Build the operator described by this section
    pub fn to_operator(&self) -> crate::domain::Result<Operator> {
        use secrecy::ExposeSecret;

        Operator::from_parts(
            &self.operator,
            &self.mask_char,
            self.number_of_chars,
            self.encrypt_key.expose_secret().as_ref(),
        )
    }

    fn validate(&self) -> Result<(), String> {
        self.to_operator().map(|_| ()).map_err(|e| e.to_string())
    }
}

/// Remote anonymization service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Anonymization endpoint URL
    #[serde(default = "default_remote_url")]
    pub url: String,

    /// Request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: default_remote_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl RemoteConfig {
    fn validate(&self) -> Result<(), String> {
        validate_http_url("remote.url", &self.url)?;
        if self.timeout_seconds == 0 {
            return Err("remote.timeout_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON lines instead of plain text
    #[serde(default = "default_true")]
    pub json_format: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: true,
        }
    }
}

impl AuditConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.log_path.as_os_str().is_empty() {
            return Err("audit.log_path is required when audit is enabled".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }
        Ok(())
    }
}

fn validate_http_url(field: &str, value: &str) -> Result<(), String> {
    let parsed = url::Url::parse(value).map_err(|e| format!("{field} is not a valid URL: {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!(
            "{field} must use http or https, got scheme '{other}'"
        )),
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_model_family() -> String {
    "spaCy".to_string()
}

fn default_model_name() -> String {
    "en_core_web_lg".to_string()
}

fn default_threshold() -> f32 {
    0.4
}

fn default_language() -> String {
    "en".to_string()
}

fn default_analyzer_url() -> Option<String> {
    Some("http://localhost:5002".to_string())
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_operator() -> String {
    "replace".to_string()
}

fn default_mask_char() -> String {
    "*".to_string()
}

fn default_number_of_chars() -> usize {
    15
}

fn default_encrypt_key() -> SecretString {
    secret_string(DEFAULT_ENCRYPT_KEY.to_string())
}

fn default_remote_url() -> String {
    "http://localhost:8000/anonymization_service/anonymize".to_string()
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/piiguard.log")
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PiiGuardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.detector.model_family, "spaCy");
        assert_eq!(config.detector.model_name, "en_core_web_lg");
        assert_eq!(config.detector.threshold, 0.4);
        assert_eq!(config.anonymizer.operator, "replace");
        assert_eq!(config.anonymizer.number_of_chars, 15);
        assert!(!config.audit.enabled);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: PiiGuardConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "warn");
        assert_eq!(
            config.remote.url,
            "http://localhost:8000/anonymization_service/anonymize"
        );
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = PiiGuardConfig::default();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_model_family_rejected() {
        let mut config = PiiGuardConfig::default();
        config.detector.model_family = "gpt".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("gpt"));
    }

    #[test]
    fn test_threshold_out_of_range() {
        let mut config = PiiGuardConfig::default();
        config.detector.threshold = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_operator_rejected() {
        let mut config = PiiGuardConfig::default();
        config.anonymizer.operator = "shred".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_multi_char_mask_rejected_only_for_mask() {
        let mut config = PiiGuardConfig::default();
        config.anonymizer.mask_char = "##".to_string();
        assert!(config.validate().is_ok());

        config.anonymizer.operator = "mask".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_remote_url_must_be_http() {
        let mut config = PiiGuardConfig::default();
        config.remote.url = "ftp://example.com/anonymize".to_string();
        assert!(config.validate().is_err());

        config.remote.url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = PiiGuardConfig::default();
        config.logging.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }
}
