//! Hash operator

use sha2::{Digest, Sha256};

/// Length of every hash replacement
pub const HASH_LEN: usize = 64;

/// Lowercase hex SHA-256 of the span; unsalted so runs are repeatable
pub fn hash_span(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    format!("{digest:x}")
}
