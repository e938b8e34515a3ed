//! Remote command implementation
//!
//! Sends text to a remote anonymization service and prints its answer.

use super::read_input;
use crate::anonymization::detector::validate_threshold;
use crate::component::{RemoteApiComponent, RemoteApiInputs};
use crate::config::load_config_or_default;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the remote command
#[derive(Args, Debug, Default)]
pub struct RemoteArgs {
    /// Text to send (reads --input or stdin when omitted)
    #[arg(short, long, conflicts_with = "input")]
    pub text: Option<String>,

    /// File to read the text from
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override the anonymization endpoint URL
    #[arg(long)]
    pub url: Option<String>,

    /// Override model family
    #[arg(long)]
    pub model_family: Option<String>,

    /// Override model name
    #[arg(long)]
    pub model_name: Option<String>,

    /// Override confidence threshold
    #[arg(long)]
    pub threshold: Option<f32>,
}

impl RemoteArgs {
    /// Execute the remote command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        let text = read_input(self.text.as_deref(), self.input.as_deref())?;
        let mut inputs = RemoteApiInputs::from_config(&config).with_text(text);
        if let Some(ref url) = self.url {
            inputs.anonymization_api_url = url.clone();
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

        if let Err(e) = validate_threshold(inputs.threshold) {
            eprintln!("❌ {e}");
            return Ok(2);
        }

        tracing::info!(url = %inputs.anonymization_api_url, "Calling remote anonymization service");

        let message = RemoteApiComponent::new(inputs).process_text().await;
        if message.is_error() {
            eprintln!("❌ {}", message.text);
            return Ok(1);
        }

        println!("{}", message.text);
        Ok(0)
    }
}
