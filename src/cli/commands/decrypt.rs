//! Decrypt command implementation
//!
//! Recovers a span rewritten by the encrypt operator.

use crate::anonymization::anonymizer::{decrypt_span, EncryptionKey};
use crate::config::{load_config_or_default, DEFAULT_ENCRYPT_KEY};
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the decrypt command
#[derive(Args, Debug)]
pub struct DecryptArgs {
    /// Token produced by the encrypt operator
    #[arg(short, long)]
    pub token: String,

    /// Passphrase (defaults to anonymizer.encrypt_key from the configuration)
    #[arg(long, env = "PIIGUARD_ENCRYPT_KEY", hide_env_values = true)]
    pub key: Option<String>,
}

impl DecryptArgs {
    /// Execute the decrypt command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let passphrase = match self.key {
            Some(ref key) => key.clone(),
            None => match load_config_or_default(config_path) {
                Ok(config) => {
                    let key: &str = config.anonymizer.encrypt_key.expose_secret().as_ref();
                    key.to_string()
                }
                Err(e) => {
                    eprintln!("❌ Failed to load configuration: {e}");
                    return Ok(2);
                }
            },
        };
        let passphrase = if passphrase.is_empty() {
            DEFAULT_ENCRYPT_KEY.to_string()
        } else {
            passphrase
        };

        let key = match EncryptionKey::from_passphrase(&passphrase) {
            Ok(key) => key,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        match decrypt_span(&key, &self.token) {
            Ok(value) => {
                println!("{value}");
                Ok(0)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token could not be decrypted");
                eprintln!("❌ {e}");
                Ok(1)
            }
        }
    }
}
