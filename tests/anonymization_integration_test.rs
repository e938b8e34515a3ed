//! Integration tests for the anonymization pipeline with the built-in
//! pattern detector

use piiguard::anonymization::anonymizer::{decrypt_span, hash_span, EncryptionKey};
use piiguard::anonymization::audit::AuditLogger;
use piiguard::anonymization::{
    create_detector, AnonymizationPipeline, DetectionRequest, Operator, PatternDetector,
};
use piiguard::config::DetectorConfig;
use std::sync::Arc;
use tempfile::TempDir;
use test_case::test_case;

const CONTACT_NOTE: &str = "Contact Jürgen at juergen@example.de or 555-123-4567 before 2024-03-01.";

fn pattern_pipeline() -> AnonymizationPipeline {
    AnonymizationPipeline::new(Arc::new(PatternDetector::new().unwrap()))
}

#[test_case(Operator::Replace,
    "Contact Jürgen at <EMAIL_ADDRESS> or <PHONE_NUMBER> before <DATE_TIME>." ; "replace")]
#[test_case(Operator::Redact, "Contact Jürgen at  or  before ." ; "redact")]
#[test_case(Operator::Highlight, CONTACT_NOTE ; "highlight")]
#[tokio::test]
async fn test_operators_end_to_end(operator: Operator, expected: &str) {
    let result = pattern_pipeline()
        .process(&DetectionRequest::new(CONTACT_NOTE), &operator)
        .await
        .unwrap();

    assert_eq!(result.anonymized_text, expected);
    let types: Vec<&str> = result
        .entities
        .iter()
        .map(|e| e.entity_type.as_str())
        .collect();
    assert_eq!(types, vec!["EMAIL_ADDRESS", "PHONE_NUMBER", "DATE_TIME"]);
}

#[tokio::test]
async fn test_entities_report_original_text() {
    let result = pattern_pipeline()
        .process(&DetectionRequest::new(CONTACT_NOTE), &Operator::Hash)
        .await
        .unwrap();

    let email = &result.entities[0];
    assert_eq!(email.text, "juergen@example.de");
    assert_eq!((email.start, email.end), (18, 36));
    assert!(result.anonymized_text.contains(&hash_span("juergen@example.de")));
    assert!(!result.anonymized_text.contains("juergen"));
}

#[tokio::test]
async fn test_mask_keeps_length_of_short_span() {
    let result = pattern_pipeline()
        .process(
            &DetectionRequest::new("SSN 123-45-6789"),
            &Operator::mask("*", 15).unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(result.anonymized_text, "SSN ***********");
}

#[tokio::test]
async fn test_encrypted_values_can_be_recovered() {
    let text = "Mail jane@example.com and jane@example.com";
    let result = pattern_pipeline()
        .process(&DetectionRequest::new(text), &Operator::encrypt("s3cret").unwrap())
        .await
        .unwrap();

    let tokens: Vec<&str> = result
        .anonymized_text
        .trim_start_matches("Mail ")
        .split(" and ")
        .collect();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], tokens[1]);

    let key = EncryptionKey::from_passphrase("s3cret").unwrap();
    assert_eq!(decrypt_span(&key, tokens[0]).unwrap(), "jane@example.com");
}

#[tokio::test]
async fn test_deny_list_reported_as_generic_pii() {
    let request = DetectionRequest::new("Project Falcon ships to falcon@example.com")
        .with_deny_list(vec!["Falcon".to_string()])
        .with_entities(vec!["PHONE_NUMBER".to_string()]);

    let result = pattern_pipeline()
        .process(&request, &Operator::Replace)
        .await
        .unwrap();

    assert_eq!(
        result.anonymized_text,
        "Project <GENERIC_PII> ships to falcon@example.com"
    );
}

#[tokio::test]
async fn test_custom_pattern_library() {
    let temp_dir = TempDir::new().unwrap();
    let library = temp_dir.path().join("patterns.toml");
    std::fs::write(
        &library,
        r#"
[patterns.employee_id]
entity_type = "EMPLOYEE_ID"
confidence = 0.9
patterns = ['\bEMP-\d{6}\b']
"#,
    )
    .unwrap();

    let config = DetectorConfig {
        model_family: "pattern".to_string(),
        pattern_library: Some(library),
        ..DetectorConfig::default()
    };
    let detector = create_detector(&config).unwrap();
    let pipeline = AnonymizationPipeline::new(detector);

    let result = pipeline
        .process(
            &DetectionRequest::new("Badge EMP-004211, mail ops@example.com"),
            &Operator::Replace,
        )
        .await
        .unwrap();

    assert_eq!(
        result.anonymized_text,
        "Badge <EMPLOYEE_ID>, mail ops@example.com"
    );
}

#[tokio::test]
async fn test_audit_log_never_contains_plaintext() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("audit").join("piiguard.log");
    let audit = AuditLogger::new(log_path.clone(), true, true).unwrap();

    let pipeline = pattern_pipeline().with_audit(Arc::new(audit));
    pipeline
        .process(&DetectionRequest::new(CONTACT_NOTE), &Operator::Redact)
        .await
        .unwrap();

    let content = std::fs::read_to_string(&log_path).unwrap();
    let entry: serde_json::Value = serde_json::from_str(content.lines().next().unwrap()).unwrap();

    assert_eq!(entry["detector"], "pattern");
    assert_eq!(entry["operator"], "redact");
    assert_eq!(entry["entities_count"], 3);
    assert_eq!(
        entry["entities"][0]["value_hash"],
        hash_span("juergen@example.de")
    );
    assert!(!content.contains("juergen@example.de"));
    assert!(!content.contains("555-123-4567"));
}
