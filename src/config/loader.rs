//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::PiiGuardConfig;
use crate::config::secret_string;
use crate::domain::errors::PiiGuardError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into PiiGuardConfig
/// 4. Applies environment variable overrides (PIIGUARD_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file is missing or unreadable, a
/// referenced variable is unset, parsing fails, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use piiguard::config::loader::load_config;
///
/// let config = load_config("piiguard.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<PiiGuardConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PiiGuardError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PiiGuardError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: PiiGuardConfig = toml::from_str(&contents)
        .map_err(|e| PiiGuardError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        PiiGuardError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Loads the configuration file if it exists, otherwise defaults
///
/// Environment overrides and validation apply either way.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<PiiGuardConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "Configuration file not found, using defaults");
    let mut config = PiiGuardConfig::default();
    apply_env_overrides(&mut config)?;
    config.validate().map_err(|e| {
        PiiGuardError::Configuration(format!("Configuration validation failed: {}", e))
    })?;
    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| PiiGuardError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(PiiGuardError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Split a comma-separated list into trimmed, non-empty terms
///
/// Used for list overrides and for the list fields components receive.
pub fn parse_term_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(String::from)
        .collect()
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| PiiGuardError::Configuration(format!("Invalid {name} value: {value}")))
}

/// Applies environment variable overrides using PIIGUARD_* prefix
///
/// Environment variables follow the pattern: PIIGUARD_<SECTION>_<KEY>
/// For example: PIIGUARD_DETECTOR_MODEL_FAMILY, PIIGUARD_ANONYMIZER_OPERATOR
fn apply_env_overrides(config: &mut PiiGuardConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("PIIGUARD_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Detector overrides
    if let Ok(val) = std::env::var("PIIGUARD_DETECTOR_MODEL_FAMILY") {
        config.detector.model_family = val;
    }
    if let Ok(val) = std::env::var("PIIGUARD_DETECTOR_MODEL_NAME") {
        config.detector.model_name = val;
    }
    if let Ok(val) = std::env::var("PIIGUARD_DETECTOR_THRESHOLD") {
        config.detector.threshold = parse_override("PIIGUARD_DETECTOR_THRESHOLD", &val)?;
    }
    if let Ok(val) = std::env::var("PIIGUARD_DETECTOR_ANALYZER_URL") {
        config.detector.analyzer_url = Some(val);
    }
    if let Ok(val) = std::env::var("PIIGUARD_DETECTOR_TA_KEY") {
        config.detector.ta_key = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("PIIGUARD_DETECTOR_TA_ENDPOINT") {
        config.detector.ta_endpoint = Some(val);
    }
    if let Ok(val) = std::env::var("PIIGUARD_DETECTOR_ALLOW_LIST") {
        config.detector.allow_list = parse_term_list(&val);
    }
    if let Ok(val) = std::env::var("PIIGUARD_DETECTOR_DENY_LIST") {
        config.detector.deny_list = parse_term_list(&val);
    }
    if let Ok(val) = std::env::var("PIIGUARD_DETECTOR_PATTERN_LIBRARY") {
        config.detector.pattern_library = Some(PathBuf::from(val));
    }

    // Anonymizer overrides
    if let Ok(val) = std::env::var("PIIGUARD_ANONYMIZER_OPERATOR") {
        config.anonymizer.operator = val;
    }
    if let Ok(val) = std::env::var("PIIGUARD_ANONYMIZER_MASK_CHAR") {
        config.anonymizer.mask_char = val;
    }
    if let Ok(val) = std::env::var("PIIGUARD_ANONYMIZER_NUMBER_OF_CHARS") {
        config.anonymizer.number_of_chars =
            parse_override("PIIGUARD_ANONYMIZER_NUMBER_OF_CHARS", &val)?;
    }
    if let Ok(val) = std::env::var("PIIGUARD_ANONYMIZER_ENCRYPT_KEY") {
        config.anonymizer.encrypt_key = secret_string(val);
    }

    // Remote overrides
    if let Ok(val) = std::env::var("PIIGUARD_REMOTE_URL") {
        config.remote.url = val;
    }
    if let Ok(val) = std::env::var("PIIGUARD_REMOTE_TIMEOUT_SECONDS") {
        config.remote.timeout_seconds = parse_override("PIIGUARD_REMOTE_TIMEOUT_SECONDS", &val)?;
    }

    // Audit overrides
    if let Ok(val) = std::env::var("PIIGUARD_AUDIT_ENABLED") {
        config.audit.enabled = parse_override("PIIGUARD_AUDIT_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("PIIGUARD_AUDIT_LOG_PATH") {
        config.audit.log_path = PathBuf::from(val);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("PIIGUARD_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("PIIGUARD_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("PIIGUARD_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("PIIGUARD_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
