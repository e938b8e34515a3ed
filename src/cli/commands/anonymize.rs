//! Anonymize command implementation
//!
//! Runs the PII processor on text from an argument, a file or stdin.

use super::{read_input, write_output};
use crate::anonymization::audit::AuditLogger;
use crate::anonymization::report;
use crate::component::{PiiProcessorComponent, PiiProcessorInputs};
use crate::config::{load_config_or_default, PiiGuardConfig};
use crate::domain::PiiGuardError;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the anonymize command
#[derive(Args, Debug, Default)]
pub struct AnonymizeArgs {
    /// Text to process (reads --input or stdin when omitted)
    #[arg(short, long, conflicts_with = "input")]
    pub text: Option<String>,

    /// File to read the text from
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// File to write the result to (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Override operator (replace, redact, mask, hash, encrypt, highlight)
    #[arg(long)]
    pub operator: Option<String>,

    /// Override model family (spaCy, Flair, HuggingFace, stanza, Azure AI Language, pattern)
    #[arg(long)]
    pub model_family: Option<String>,

    /// Override model name
    #[arg(long)]
    pub model_name: Option<String>,

    /// Override confidence threshold (0.0-1.0)
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Override mask character
    #[arg(long)]
    pub mask_char: Option<String>,

    /// Override number of characters to mask
    #[arg(long)]
    pub number_of_chars: Option<usize>,

    /// Override encryption passphrase
    #[arg(long, env = "PIIGUARD_ENCRYPT_KEY", hide_env_values = true)]
    pub encrypt_key: Option<String>,

    /// Terms never reported as PII (comma-separated)
    #[arg(long)]
    pub allow_list: Option<String>,

    /// Terms always reported as PII (comma-separated)
    #[arg(long)]
    pub deny_list: Option<String>,

    /// Entity types to report (comma-separated)
    #[arg(long)]
    pub entities: Option<String>,

    /// Append detection statistics
    #[arg(long)]
    pub stats: bool,

    /// Append the numbered list of detected entities
    #[arg(long)]
    pub show_entities: bool,

    /// Print the entity report to stderr
    #[arg(long)]
    pub report: bool,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting anonymize command");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let text = read_input(self.text.as_deref(), self.input.as_deref())?;
        let inputs = self.build_inputs(&config, text);

        let mut component = PiiProcessorComponent::new(inputs);
        if config.audit.enabled {
            let audit = AuditLogger::from_config(&config.audit)?;
            component = component.with_audit(Arc::new(audit));
        }

        if component.inputs().input_text.is_empty() {
            write_output(self.output.as_deref(), crate::component::NO_INPUT_TEXT)?;
            return Ok(0);
        }

        let result = match component.process().await {
            Ok(result) => result.clone(),
            Err(e) => {
                tracing::error!(error = %e, "Anonymization failed");
                eprintln!("❌ Error processing PII: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        if self.json {
            write_output(
                self.output.as_deref(),
                &serde_json::to_string_pretty(&result)?,
            )?;
        } else {
            let text = report::processed_text(&result, self.stats, self.show_entities);
            write_output(self.output.as_deref(), &text)?;
        }

        if self.report {
            eprintln!("{}", report::entity_report(Some(&result)));
        }

        Ok(0)
    }

    fn build_inputs(&self, config: &PiiGuardConfig, text: String) -> PiiProcessorInputs {
        let mut inputs = PiiProcessorInputs::from_config(config).with_text(text);

        if let Some(ref operator) = self.operator {
            inputs.operator = operator.clone();
        }
        if let Some(ref family) = self.model_family {
            inputs.model_family = family.clone();
        }
        if let Some(ref model) = self.model_name {
            inputs.model_name = model.clone();
        }
        if let Some(threshold) = self.threshold {
            inputs.threshold = threshold;
        }
        if let Some(ref mask_char) = self.mask_char {
            inputs.mask_char = mask_char.clone();
        }
        if let Some(n) = self.number_of_chars {
            inputs.number_of_chars = n;
        }
        if let Some(ref key) = self.encrypt_key {
            inputs = inputs.with_encrypt_key(key.clone());
        }
        if let Some(ref allow) = self.allow_list {
            inputs.allow_list = allow.clone();
        }
        if let Some(ref deny) = self.deny_list {
            inputs.deny_list = deny.clone();
        }
        if let Some(ref entities) = self.entities {
            inputs.entities = entities.clone();
        }
        inputs.include_stats = self.stats;
        inputs.return_entities = self.show_entities;
        inputs
    }
}

/// Configuration problems exit with 2, everything else with 1
fn exit_code_for(error: &PiiGuardError) -> i32 {
    match error {
        PiiGuardError::Configuration(_) => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_applied() {
        let args = AnonymizeArgs {
            operator: Some("mask".to_string()),
            model_family: Some("pattern".to_string()),
            threshold: Some(0.8),
            allow_list: Some("Acme".to_string()),
            stats: true,
            ..Default::default()
        };
        let inputs = args.build_inputs(&PiiGuardConfig::default(), "text".to_string());

        assert_eq!(inputs.operator, "mask");
        assert_eq!(inputs.model_family, "pattern");
        assert_eq!(inputs.threshold, 0.8);
        assert_eq!(inputs.allow_list, "Acme");
        assert!(inputs.include_stats);
        assert_eq!(inputs.model_name, "en_core_web_lg");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            exit_code_for(&PiiGuardError::Configuration("bad".to_string())),
            2
        );
        assert_eq!(
            exit_code_for(&PiiGuardError::DetectionUnavailable("down".to_string())),
            1
        );
    }

    #[tokio::test]
    async fn test_execute_with_pattern_family() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.txt");
        let args = AnonymizeArgs {
            text: Some("Reach me at jane@example.com".to_string()),
            output: Some(output.clone()),
            model_family: Some("pattern".to_string()),
            ..Default::default()
        };

        let code = args
            .execute(dir.path().join("missing.toml").to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(code, 0);
        assert_eq!(
            std::fs::read_to_string(output).unwrap(),
            "Reach me at <EMAIL_ADDRESS>"
        );
    }

    #[tokio::test]
    async fn test_execute_unknown_operator() {
        let dir = tempfile::tempdir().unwrap();
        let args = AnonymizeArgs {
            text: Some("jane@example.com".to_string()),
            model_family: Some("pattern".to_string()),
            operator: Some("shred".to_string()),
            ..Default::default()
        };

        let code = args
            .execute(dir.path().join("missing.toml").to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_execute_nan_threshold_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.txt");
        let args = AnonymizeArgs {
            text: Some("Reach me at jane@example.com".to_string()),
            output: Some(output.clone()),
            model_family: Some("pattern".to_string()),
            threshold: Some(f32::NAN),
            ..Default::default()
        };

        let code = args
            .execute(dir.path().join("missing.toml").to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
        assert!(!output.exists());
    }
}
