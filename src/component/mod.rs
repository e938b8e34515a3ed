//! Host-facing components
//!
//! Components take the loosely typed inputs a workflow host hands them
//! (strings, comma-separated lists, floats) and turn every outcome, errors
//! included, into output text. Nothing here returns `Err` to the host.
//!
//! - [`PiiProcessorComponent`]: detect and anonymize with a local or
//!   analyzer-backed detector
//! - [`RemoteApiComponent`]: forward text to a remote anonymization service

pub mod processor;
pub mod remote;

pub use processor::{PiiProcessorComponent, PiiProcessorInputs};
pub use remote::{RemoteApiComponent, RemoteApiInputs};

pub use crate::config::parse_term_list;

use serde::{Deserialize, Serialize};

/// Output when the host passes no text
pub const NO_INPUT_TEXT: &str = "No input text provided.";

/// Kind of a component message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Error,
}

/// Message handed back to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Text,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}
