//! Audit logger for anonymization runs

use crate::anonymization::anonymizer::hash_span;
use crate::anonymization::models::{AnnotatedEntity, AnonymizationResult};
use crate::anonymization::operator::OperatorKind;
use crate::config::AuditConfig;
use crate::domain::{PiiGuardError, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use uuid::Uuid;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry<'a> {
    invocation_id: String,
    timestamp: String,
    detector: &'a str,
    operator: &'static str,
    entities_count: usize,
    processing_time_ms: u64,
    entities: Vec<AuditEntity<'a>>,
}

/// Audit entity entry (with hashed PII)
#[derive(Debug, Serialize)]
struct AuditEntity<'a> {
    entity_type: &'a str,
    start: usize,
    end: usize,
    score: f32,
    /// SHA-256 of the matched text; plaintext PII is never written
    value_hash: String,
}

/// Appends one line per anonymization run
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
    enabled: bool,
    write_lock: Mutex<()>,
}

impl AuditLogger {
    /// Create a new audit logger, creating the log directory when enabled
    pub fn new(log_path: PathBuf, json_format: bool, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    PiiGuardError::Io(format!(
                        "Failed to create audit log directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
            enabled,
            write_lock: Mutex::new(()),
        })
    }

    pub fn from_config(config: &AuditConfig) -> Result<Self> {
        Self::new(config.log_path.clone(), config.json_format, config.enabled)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Record one run; returns the invocation id written, if any
    pub fn log_anonymization(
        &self,
        detector: &str,
        operator: OperatorKind,
        result: &AnonymizationResult,
        processing_time_ms: u64,
    ) -> Result<Option<Uuid>> {
        if !self.enabled {
            return Ok(None);
        }

        let invocation_id = Uuid::new_v4();
        let entry = AuditLogEntry {
            invocation_id: invocation_id.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            detector,
            operator: operator.as_str(),
            entities_count: result.entities.len(),
            processing_time_ms,
            entities: result.entities.iter().map(audit_entity).collect(),
        };

        self.write_entry(&entry)?;
        Ok(Some(invocation_id))
    }

    fn write_entry(&self, entry: &AuditLogEntry<'_>) -> Result<()> {
        let line = if self.json_format {
            serde_json::to_string(entry)?
        } else {
            let types: Vec<&str> = entry.entities.iter().map(|e| e.entity_type).collect();
            format!(
                "[{}] Invocation: {} | Detector: {} | Operator: {} | Entities: {} [{}] | Time: {}ms",
                entry.timestamp,
                entry.invocation_id,
                entry.detector,
                entry.operator,
                entry.entities_count,
                types.join(", "),
                entry.processing_time_ms
            )
        };

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| PiiGuardError::Io("Audit log lock poisoned".to_string()))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                PiiGuardError::Io(format!(
                    "Failed to open audit log {}: {e}",
                    self.log_path.display()
                ))
            })?;

        writeln!(file, "{line}")
            .map_err(|e| PiiGuardError::Io(format!("Failed to write audit entry: {e}")))
    }
}

fn audit_entity(entity: &AnnotatedEntity) -> AuditEntity<'_> {
    AuditEntity {
        entity_type: &entity.entity_type,
        start: entity.start,
        end: entity.end,
        score: entity.score,
        value_hash: hash_span(&entity.text),
    }
}
