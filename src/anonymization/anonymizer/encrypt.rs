//! Encrypt operator
//!
//! AES-256-GCM with a key derived from an opaque passphrase (SHA-256). The
//! nonce is the first 12 bytes of SHA-256(key || plaintext), so the same key
//! and plaintext always produce the same token. Tokens are standard base64
//! of `nonce || ciphertext || tag`.

use crate::domain::{PiiGuardError, Result};
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::{Digest, Sha256};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// 256-bit key derived from a passphrase, zeroed on drop
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey([u8; 32]);

impl EncryptionKey {
    /// Derive a key from a passphrase of any length
    pub fn from_passphrase(passphrase: &str) -> Result<Self> {
        if passphrase.is_empty() {
            return Err(PiiGuardError::Configuration(
                "encrypt_key must not be empty".to_string(),
            ));
        }
        let digest: [u8; 32] = Sha256::digest(passphrase.as_bytes()).into();
        Ok(Self(digest))
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.0))
    }

    fn nonce_for(&self, plaintext: &[u8]) -> [u8; NONCE_LEN] {
        let mut hasher = Sha256::new();
        hasher.update(self.0);
        hasher.update(plaintext);
        let digest = hasher.finalize();

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&digest[..NONCE_LEN]);
        nonce
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey([REDACTED])")
    }
}

/// Encrypt one span into a base64 token
pub fn encrypt_span(key: &EncryptionKey, plaintext: &str) -> Result<String> {
    let nonce_bytes = key.nonce_for(plaintext.as_bytes());
    let ciphertext = key
        .cipher()
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
        .map_err(|e| PiiGuardError::Encryption(format!("Encryption failed: {e}")))?;

    let mut token = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    token.extend_from_slice(&nonce_bytes);
    token.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(token))
}

/// Recover the original span from a token produced by [`encrypt_span`]
///
/// # Errors
///
/// Fails when the token is not valid base64, is too short, was produced
/// with a different key, or was tampered with.
pub fn decrypt_span(key: &EncryptionKey, token: &str) -> Result<String> {
    let raw = BASE64
        .decode(token.trim())
        .map_err(|e| PiiGuardError::Encryption(format!("Invalid token encoding: {e}")))?;

    if raw.len() < NONCE_LEN + TAG_LEN {
        return Err(PiiGuardError::Encryption(format!(
            "Token too short: {} bytes",
            raw.len()
        )));
    }

    let (nonce, ciphertext) = raw.split_at(NONCE_LEN);
    let plaintext = key
        .cipher()
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| {
            PiiGuardError::Encryption("Decryption failed: wrong key or corrupted token".to_string())
        })?;

    String::from_utf8(plaintext)
        .map_err(|e| PiiGuardError::Encryption(format!("Decrypted value is not UTF-8: {e}")))
}
