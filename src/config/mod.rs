//! Configuration management for piiguard.
//!
//! piiguard reads a TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `PIIGUARD_<SECTION>_<KEY>` overrides
//! - Default values for every setting
//! - Validation on load
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - log level
//! - [`DetectorConfig`] - model family, threshold, allow/deny lists, endpoints
//! - [`AnonymizerConfig`] - operator and operator parameters
//! - [`RemoteConfig`] - remote anonymization service
//! - [`AuditConfig`] - audit log
//! - [`LoggingConfig`] - file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [detector]
//! model_family = "spaCy"
//! model_name = "en_core_web_lg"
//! analyzer_url = "http://localhost:5002"
//! threshold = 0.4
//! allow_list = ["Acme Corp"]
//!
//! [anonymizer]
//! operator = "encrypt"
//! encrypt_key = "${PIIGUARD_ENCRYPT_KEY}"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_or_default, parse_term_list};
pub use schema::{
    AnonymizerConfig, ApplicationConfig, AuditConfig, DetectorConfig, LoggingConfig,
    PiiGuardConfig, RemoteConfig, DEFAULT_ENCRYPT_KEY, DEFAULT_LOG_LEVEL,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
