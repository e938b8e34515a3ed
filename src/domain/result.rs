//! Result type alias for piiguard

use super::errors::PiiGuardError;

/// Result type alias for piiguard operations
///
/// # Examples
///
/// ```
/// use piiguard::domain::result::Result;
/// use piiguard::domain::errors::PiiGuardError;
///
/// fn parse_threshold(raw: &str) -> Result<f32> {
///     raw.parse()
///         .map_err(|_| PiiGuardError::Configuration(format!("Invalid threshold: {raw}")))
/// }
///
/// assert!(parse_threshold("0.4").is_ok());
/// assert!(parse_threshold("high").is_err());
/// ```
pub type Result<T> = std::result::Result<T, PiiGuardError>;
