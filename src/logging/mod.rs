//! Logging and observability
//!
//! Structured logging through `tracing`, with helper macros for the events
//! every detection run emits. PII values are never logged; only entity
//! types, counts, and offsets.
//!
//! # Example
//!
//! ```no_run
//! use piiguard::logging::init_logging;
//! use piiguard::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the outcome of one detection pass
///
/// # Example
///
/// ```no_run
/// use piiguard::log_detection_complete;
/// use std::time::Duration;
///
/// log_detection_complete!("pattern", 3, Duration::from_millis(12));
/// ```
#[macro_export]
macro_rules! log_detection_complete {
    ($detector:expr, $count:expr, $duration:expr) => {
        tracing::info!(
            detector = $detector,
            entities = $count,
            duration_ms = $duration.as_millis() as u64,
            "Detection completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use piiguard::log_error_with_context;
/// use piiguard::domain::PiiGuardError;
///
/// let error = PiiGuardError::Configuration("Unsupported operator".to_string());
/// log_error_with_context!(&error, "Failed to build operator");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
