// piiguard - PII detection and anonymization toolkit
// Copyright (c) 2025 piiguard Contributors
// Licensed under the MIT License

//! # piiguard - PII detection and anonymization
//!
//! piiguard finds personally identifiable information in free text and
//! rewrites it, either locally or through a remote anonymization service.
//!
//! ## Overview
//!
//! This library provides:
//! - **Detecting** PII spans with a pluggable [`anonymization::EntityDetector`]
//!   (Presidio analyzer NER families, Azure AI Language, or built-in regex patterns)
//! - **Transforming** the text with one operator per run: replace, redact,
//!   mask, hash, encrypt or highlight
//! - **Reporting** detected entities and statistics in a host-friendly format
//! - **Forwarding** text to a remote anonymization API
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`anonymization`] - Detectors, operators, the span transformer and audit
//! - [`component`] - Host-facing components with string inputs and outputs
//! - [`adapters`] - HTTP clients for Presidio, Azure AI Language and remote APIs
//! - [`domain`] - Error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use piiguard::anonymization::{transform, DetectedEntity, Operator};
//!
//! let text = "John Smith lives in Paris.";
//! let entities = vec![
//!     DetectedEntity::new("PERSON", 0, 10, 0.85),
//!     DetectedEntity::new("LOCATION", 20, 25, 0.9),
//! ];
//!
//! let result = transform(text, &entities, &Operator::Replace).unwrap();
//! assert_eq!(result.anonymized_text, "<PERSON> lives in <LOCATION>.");
//! ```
//!
//! ## Components
//!
//! ```rust,no_run
//! use piiguard::component::{PiiProcessorComponent, PiiProcessorInputs};
//!
//! # async fn example() {
//! let mut inputs = PiiProcessorInputs::default().with_text("Call 555-123-4567");
//! inputs.model_family = "pattern".to_string();
//!
//! let mut processor = PiiProcessorComponent::new(inputs);
//! println!("{}", processor.anonymized_text().await);
//! println!("{}", processor.detected_entities());
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`], backed by
//! [`domain::PiiGuardError`]. Components turn failures into user-visible
//! error messages instead of propagating them.

pub mod adapters;
pub mod anonymization;
pub mod cli;
pub mod component;
pub mod config;
pub mod domain;
pub mod logging;
