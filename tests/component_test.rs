//! Integration tests for the PII processor component

use piiguard::component::{MessageKind, PiiProcessorComponent, PiiProcessorInputs};

fn pattern_inputs(text: &str) -> PiiProcessorInputs {
    let mut inputs = PiiProcessorInputs::default().with_text(text);
    inputs.model_family = "pattern".to_string();
    inputs
}

#[tokio::test]
async fn test_outputs_share_one_run() {
    let mut processor = PiiProcessorComponent::new(pattern_inputs(
        "Server 10.0.0.12 logged in from https://intranet.example.org/login",
    ));

    let text = processor.anonymized_text().await;
    assert_eq!(text, "Server <IP_ADDRESS> logged in from <URL>");

    let report = processor.detected_entities();
    assert_eq!(
        report,
        "Detected PII Entities:\n\n\
         - IP_ADDRESS: '10.0.0.12' (confidence: 0.95)\n\
         - URL: 'https://intranet.example.org/login' (confidence: 0.60)\n"
    );

    let message = processor.message_response().await;
    assert_eq!(message.kind, MessageKind::Text);
    assert_eq!(message.text, text);
}

#[tokio::test]
async fn test_stats_and_listing() {
    let mut inputs = pattern_inputs("a@example.com, b@example.com, 555-123-4567");
    inputs.operator = "mask".to_string();
    inputs.number_of_chars = 3;
    inputs.include_stats = true;
    inputs.return_entities = true;

    let mut processor = PiiProcessorComponent::new(inputs);
    let text = processor.anonymized_text().await;

    assert_eq!(
        text,
        "***xample.com, ***xample.com, ***-123-4567\n\n\
         --- PII Detection Statistics ---\n\
         Total entities found: 3\n\
         EMAIL_ADDRESS: 2\n\
         PHONE_NUMBER: 1\n\
         \n\n--- Detected Entities ---\n\
         1. EMAIL_ADDRESS (1.00): 'a@example.com' [position: 0-13]\n\
         2. EMAIL_ADDRESS (1.00): 'b@example.com' [position: 15-28]\n\
         3. PHONE_NUMBER (0.75): '555-123-4567' [position: 30-42]\n"
    );
}

#[tokio::test]
async fn test_stats_without_entities() {
    let mut inputs = pattern_inputs("Nothing sensitive here.");
    inputs.include_stats = true;
    inputs.return_entities = true;

    let mut processor = PiiProcessorComponent::new(inputs);
    assert_eq!(
        processor.anonymized_text().await,
        "Nothing sensitive here.\n\n--- PII Detection Statistics ---\nNo entities found."
    );
    assert_eq!(
        processor.detected_entities(),
        "No PII entities were detected in the document."
    );
}

#[tokio::test]
async fn test_entities_filter_and_threshold() {
    let mut inputs = pattern_inputs("jane@example.com visited https://example.org on 2024-01-05");
    inputs.entities = "EMAIL_ADDRESS, URL".to_string();
    inputs.threshold = 0.7;

    let mut processor = PiiProcessorComponent::new(inputs);
    assert_eq!(
        processor.anonymized_text().await,
        "<EMAIL_ADDRESS> visited https://example.org on 2024-01-05"
    );
}

#[tokio::test]
async fn test_empty_encrypt_key_uses_default_passphrase() {
    let mut inputs = pattern_inputs("jane@example.com").with_encrypt_key("");
    inputs.operator = "encrypt".to_string();

    let mut processor = PiiProcessorComponent::new(inputs);
    let text = processor.anonymized_text().await;

    assert!(!text.starts_with("Error processing PII"));
    assert_ne!(text, "jane@example.com");
}

#[tokio::test]
async fn test_bad_mask_char_is_reported() {
    let mut inputs = pattern_inputs("jane@example.com");
    inputs.operator = "mask".to_string();
    inputs.mask_char = "##".to_string();

    let mut processor = PiiProcessorComponent::new(inputs);
    let message = processor.message_response().await;

    assert_eq!(message.kind, MessageKind::Error);
    assert!(message.text.starts_with("Error processing PII: Configuration error:"));
    assert_eq!(
        processor.detected_entities(),
        "No entities detected or text not processed."
    );
}

#[tokio::test]
async fn test_unknown_model_family_is_reported() {
    let mut inputs = pattern_inputs("jane@example.com");
    inputs.model_family = "bert".to_string();

    let mut processor = PiiProcessorComponent::new(inputs);
    let text = processor.anonymized_text().await;

    assert!(text.starts_with("Error processing PII: Configuration error: Unsupported model family 'bert'"));
}

#[tokio::test]
async fn test_nan_threshold_never_returns_plaintext() {
    let mut inputs = pattern_inputs("Reach me at jane@example.com");
    inputs.threshold = f32::NAN;

    let mut processor = PiiProcessorComponent::new(inputs);
    let message = processor.message_response().await;

    assert_eq!(message.kind, MessageKind::Error);
    assert!(message
        .text
        .starts_with("Error processing PII: Configuration error: threshold"));
    assert!(!message.text.contains("jane@example.com"));
    assert_eq!(
        processor.detected_entities(),
        "No entities detected or text not processed."
    );
}
