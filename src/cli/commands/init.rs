//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "piiguard.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing piiguard configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Pick a model_family and point analyzer_url at a Presidio analyzer");
                println!("     (or use model_family = \"pattern\" to run without one)");
                println!("  3. Set PIIGUARD_ENCRYPT_KEY if you use the encrypt operator");
                println!("  4. Validate configuration: piiguard validate-config");
                println!("  5. Anonymize text: piiguard anonymize --text \"...\"");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# piiguard Configuration File

[application]
log_level = "warn"

[detector]
model_family = "spaCy"
model_name = "en_core_web_lg"
analyzer_url = "http://localhost:5002"
threshold = 0.4
language = "en"

[anonymizer]
operator = "replace"

[remote]
url = "http://localhost:8000/anonymization_service/anonymize"

[audit]
enabled = false

[logging]
local_enabled = false
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# piiguard Configuration File
# PII detection and anonymization
#
# Values of the form ${VAR_NAME} are read from the environment, and every
# key can be overridden with PIIGUARD_<SECTION>_<KEY>.

# ============================================================================
# Application Configuration
# ============================================================================
[application]
# Log level: trace, debug, info, warn, error (--log-level takes precedence)
log_level = "warn"

# ============================================================================
# Detector Configuration
# ============================================================================
[detector]
# Model family: spaCy, Flair, HuggingFace, stanza, Azure AI Language, pattern
model_family = "spaCy"

# Model name within the family. Common choices:
#   spaCy:       en_core_web_lg, en_core_web_md, en_core_web_sm
#   Flair:       flair/ner-english-large
#   HuggingFace: obi/deid_roberta_i2b2, StanfordAIMI/stanford-deidentifier-base
#   stanza:      en
model_name = "en_core_web_lg"

# Presidio analyzer serving the NER families
analyzer_url = "http://localhost:5002"

# Minimum confidence score (0.0 - 1.0)
threshold = 0.4

# Language code
language = "en"

# Terms never reported as PII
allow_list = []

# Terms always reported as PII (entity type GENERIC_PII)
deny_list = []

# Entity types to report; empty reports every supported type
# entities = ["PERSON", "EMAIL_ADDRESS", "PHONE_NUMBER"]
entities = []

# Azure AI Language (model_family = "Azure AI Language")
# ta_endpoint = "https://your-resource.cognitiveservices.azure.com"
# ta_key = "${PIIGUARD_TA_KEY}"

# Custom regex library (model_family = "pattern")
# pattern_library = "patterns/pii_patterns.toml"

# HTTP timeout for remote detectors
timeout_seconds = 30

# ============================================================================
# Anonymizer Configuration
# ============================================================================
[anonymizer]
# Operator: replace, redact, mask, hash, encrypt, highlight
operator = "replace"

# Mask operator settings
mask_char = "*"
number_of_chars = 15

# Encrypt operator passphrase
# encrypt_key = "${PIIGUARD_ENCRYPT_KEY}"

# ============================================================================
# Remote Anonymization Service
# ============================================================================
[remote]
url = "http://localhost:8000/anonymization_service/anonymize"
timeout_seconds = 30

# ============================================================================
# Audit Configuration
# ============================================================================
[audit]
# Record every run; matched values are stored as SHA-256 hashes only
enabled = false
log_path = "./audit/piiguard.log"
json_format = true

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local file logging
local_enabled = false

# Local log directory
local_path = "./logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"
"#
        .to_string()
    }
}
