//! Validate config command implementation
//!
//! Loads the configuration file, validates every section and prints a
//! summary with secrets left out.

use crate::config::{load_config, PiiGuardConfig};
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        match config.validate() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                println!();
                print_summary(&config);
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2)
            }
        }
    }
}

fn print_summary(config: &PiiGuardConfig) {
    let detector = &config.detector;

    println!("Configuration Summary:");
    println!("  Log Level: {}", config.application.log_level);
    println!("  Model Family: {}", detector.model_family);
    println!("  Model Name: {}", detector.model_name);
    println!("  Threshold: {}", detector.threshold);
    println!("  Language: {}", detector.language);
    if let Some(ref url) = detector.analyzer_url {
        println!("  Analyzer URL: {url}");
    }
    if let Some(ref endpoint) = detector.ta_endpoint {
        println!("  Azure AI Language Endpoint: {endpoint}");
        println!(
            "  Azure AI Language Key: {}",
            if detector.ta_key.is_some() {
                "set"
            } else {
                "missing"
            }
        );
    }
    if let Some(ref library) = detector.pattern_library {
        println!("  Pattern Library: {}", library.display());
    }
    println!("  Allow List: {} term(s)", detector.allow_list.len());
    println!("  Deny List: {} term(s)", detector.deny_list.len());
    if detector.entities.is_empty() {
        println!("  Entities: all");
    } else {
        println!("  Entities: {}", detector.entities.join(", "));
    }
    println!("  Operator: {}", config.anonymizer.operator);
    println!("  Remote URL: {}", config.remote.url);
    if config.audit.enabled {
        println!("  Audit Log: {}", config.audit.log_path.display());
    } else {
        println!("  Audit Log: disabled");
    }
    println!();
}
