//! Domain error types and result alias.
//!
//! Every fallible operation in the library returns [`Result<T>`] with
//! [`PiiGuardError`] as the error type:
//!
//! ```rust
//! use piiguard::domain::{PiiGuardError, Result};
//!
//! fn require_text(text: &str) -> Result<&str> {
//!     if text.is_empty() {
//!         return Err(PiiGuardError::Validation("empty text".to_string()));
//!     }
//!     Ok(text)
//! }
//! # assert!(require_text("").is_err());
//! ```

pub mod errors;
pub mod result;

pub use errors::{PiiGuardError, TransportError};
pub use result::Result;
