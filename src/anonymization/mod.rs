//! PII detection and anonymization
//!
//! # Architecture
//!
//! - **Detection**: [`EntityDetector`] implementations return character
//!   spans; the built-in [`PatternDetector`] or a remote NER service
//! - **Transformation**: [`transform`] resolves overlaps and rewrites spans
//!   with an [`Operator`]
//! - **Pipeline**: [`AnonymizationPipeline`] runs both with an injected
//!   detector
//! - **Reporting and audit**: [`report`] formats results for hosts,
//!   [`audit`] records runs with hashed values
//!
//! # Usage
//!
//! ```
//! use piiguard::anonymization::{transform, DetectedEntity, Operator};
//!
//! let entities = vec![DetectedEntity::new("PHONE_NUMBER", 5, 15, 0.7)];
//! let operator = Operator::mask("*", 4)?;
//! let result = transform("Call 0123456789 now", &entities, &operator)?;
//! assert_eq!(result.anonymized_text, "Call ****456789 now");
//! # Ok::<(), piiguard::domain::PiiGuardError>(())
//! ```

pub mod anonymizer;
pub mod audit;
pub mod detector;
pub mod models;
pub mod operator;
pub mod pipeline;
pub mod report;
pub mod transformer;

// Re-export main types
pub use detector::{create_detector, DetectionRequest, EntityDetector, ModelFamily, PatternDetector};
pub use models::{AnnotatedEntity, AnonymizationResult, DetectedEntity};
pub use operator::{Operator, OperatorKind};
pub use pipeline::AnonymizationPipeline;
pub use transformer::transform;
