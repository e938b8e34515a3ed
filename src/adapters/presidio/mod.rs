//! Presidio REST integrations
//!
//! - [`PresidioAnalyzer`]: entity detection through a Presidio analyzer
//!   (`POST /analyze`) hosting a spaCy, Flair, HuggingFace or stanza model
//! - [`RemoteAnonymizationClient`]: pass-through client for an external
//!   anonymization service

pub mod analyzer;
pub mod service;

pub use analyzer::PresidioAnalyzer;
pub use service::{RemoteAnonymizationClient, RemoteAnonymizationRequest};
