//! Audit logging module
//!
//! Structured audit trail for anonymization runs. Matched values are stored
//! only as SHA-256 hashes.

pub mod logger;

pub use logger::AuditLogger;
