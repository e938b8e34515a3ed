//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for piiguard using clap.

pub mod commands;

use crate::config::{load_config_or_default, LoggingConfig, DEFAULT_LOG_LEVEL};
use clap::{Parser, Subcommand};

/// piiguard - PII detection and anonymization
#[derive(Parser, Debug)]
#[command(name = "piiguard")]
#[command(version, about, long_about = None)]
#[command(author = "piiguard Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "piiguard.toml", env = "PIIGUARD_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PIIGUARD_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log level and file logging settings for this invocation
    ///
    /// `--log-level` wins over `[application].log_level`. When the
    /// configuration cannot be loaded, logging falls back to the console
    /// defaults and the command reports the error itself.
    pub fn logging_settings(&self) -> (String, LoggingConfig) {
        match load_config_or_default(&self.config) {
            Ok(config) => {
                let level = self
                    .log_level
                    .clone()
                    .unwrap_or(config.application.log_level);
                (level, config.logging)
            }
            Err(_) => (
                self.log_level
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
                LoggingConfig::default(),
            ),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect and anonymize PII in text
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Send text to a remote anonymization service
    Remote(commands::remote::RemoteArgs),

    /// Recover a value produced by the encrypt operator
    Decrypt(commands::decrypt::DecryptArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
