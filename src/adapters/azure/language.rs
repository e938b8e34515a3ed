//! Azure AI Language PII detector
//!
//! Calls the `PiiEntityRecognition` task of the Language `analyze-text` API
//! with code point offsets, then maps Azure categories onto the entity
//! labels the rest of piiguard uses.

use crate::adapters::{http_client, join_url};
use crate::anonymization::detector::{DetectionRequest, EntityDetector};
use crate::anonymization::models::DetectedEntity;
use crate::config::SecretString;
use crate::domain::{PiiGuardError, Result};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

const API_VERSION: &str = "2023-04-01";
const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Detector backed by Azure AI Language
pub struct AzureLanguageDetector {
    analyze_url: String,
    key: SecretString,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeTextRequest<'a> {
    kind: &'static str,
    analysis_input: AnalysisInput<'a>,
    parameters: Parameters,
}

#[derive(Debug, Serialize)]
struct AnalysisInput<'a> {
    documents: [Document<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Document<'a> {
    id: &'static str,
    language: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Parameters {
    model_version: &'static str,
    string_index_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct AnalyzeTextResponse {
    results: AnalyzeResults,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResults {
    #[serde(default)]
    documents: Vec<DocumentResult>,
    #[serde(default)]
    errors: Vec<DocumentError>,
}

#[derive(Debug, Deserialize)]
struct DocumentResult {
    #[serde(default)]
    entities: Vec<AzureEntity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AzureEntity {
    category: String,
    offset: usize,
    length: usize,
    confidence_score: f32,
}

#[derive(Debug, Deserialize)]
struct DocumentError {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl AzureLanguageDetector {
    /// Create a detector for the Language resource at `endpoint`
    pub fn new(endpoint: &str, key: SecretString, timeout_seconds: u64) -> Result<Self> {
        if key.expose_secret().is_empty() {
            return Err(PiiGuardError::DetectionUnavailable(
                "Azure AI Language requires ta_key".to_string(),
            ));
        }

        let analyze_url = format!(
            "{}?api-version={API_VERSION}&stringIndexType=UnicodeCodePoint",
            join_url(endpoint, "language/:analyze-text")
        );

        Ok(Self {
            analyze_url,
            key,
            client: http_client(timeout_seconds)?,
        })
    }
}

/// Convert one Azure entity, dropping empty or overflowing spans
fn to_detected_entity(entity: AzureEntity) -> Option<DetectedEntity> {
    if entity.length == 0 {
        return None;
    }
    let Some(end) = entity.offset.checked_add(entity.length) else {
        tracing::warn!(
            category = %entity.category,
            offset = entity.offset,
            length = entity.length,
            "Dropping Azure entity with overflowing span"
        );
        return None;
    };
    Some(DetectedEntity::new(
        map_category(&entity.category),
        entity.offset,
        end,
        entity.confidence_score,
    ))
}

/// Map an Azure PII category to the label used elsewhere in piiguard
///
/// Unknown categories are converted from `CamelCase` to `SCREAMING_SNAKE`.
pub fn map_category(category: &str) -> String {
    let mapped = match category {
        "Person" => "PERSON",
        "PersonType" => "NRP",
        "PhoneNumber" => "PHONE_NUMBER",
        "Email" => "EMAIL_ADDRESS",
        "Address" => "LOCATION",
        "Organization" => "ORGANIZATION",
        "URL" => "URL",
        "IPAddress" => "IP_ADDRESS",
        "DateTime" | "Date" => "DATE_TIME",
        "Age" => "AGE",
        "CreditCardNumber" => "CREDIT_CARD",
        "USSocialSecurityNumber" => "US_SSN",
        "InternationalBankingAccountNumber" => "IBAN_CODE",
        "USBankAccountNumber" => "US_BANK_NUMBER",
        "USDriversLicenseNumber" => "US_DRIVER_LICENSE",
        "USUKPassportNumber" => "US_PASSPORT",
        _ => return screaming_snake(category),
    };
    mapped.to_string()
}

fn screaming_snake(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }
    out
}

#[async_trait]
impl EntityDetector for AzureLanguageDetector {
    async fn analyze(&self, request: &DetectionRequest) -> Result<Vec<DetectedEntity>> {
        let body = AnalyzeTextRequest {
            kind: "PiiEntityRecognition",
            analysis_input: AnalysisInput {
                documents: [Document {
                    id: "1",
                    language: &request.language,
                    text: &request.text,
                }],
            },
            parameters: Parameters {
                model_version: "latest",
                string_index_type: "UnicodeCodePoint",
            },
        };

        tracing::debug!(url = %self.analyze_url, "Calling Azure AI Language");

        let response = self
            .client
            .post(&self.analyze_url)
            .header(KEY_HEADER, self.key.expose_secret().as_ref())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                PiiGuardError::DetectionUnavailable(format!(
                    "Azure AI Language is unreachable: {e}"
                ))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PiiGuardError::DetectionUnavailable(format!(
                "Azure AI Language returned {status}: {body}"
            )));
        }

        let parsed: AnalyzeTextResponse = response.json().await.map_err(|e| {
            PiiGuardError::DetectionUnavailable(format!(
                "Invalid response from Azure AI Language: {e}"
            ))
        })?;

        if let Some(failure) = parsed.results.errors.first() {
            return Err(PiiGuardError::DetectionUnavailable(format!(
                "Azure AI Language rejected the document: {} - {}",
                failure.error.code, failure.error.message
            )));
        }

        let entities = parsed
            .results
            .documents
            .into_iter()
            .flat_map(|doc| doc.entities)
            .filter_map(to_detected_entity)
            .collect();

        Ok(request.finalize(entities))
    }

    fn name(&self) -> &str {
        "Azure AI Language"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use test_case::test_case;

    #[test_case("Person", "PERSON")]
    #[test_case("Email", "EMAIL_ADDRESS")]
    #[test_case("Address", "LOCATION")]
    #[test_case("USSocialSecurityNumber", "US_SSN")]
    #[test_case("EUDebitCardNumber", "EU_DEBIT_CARD_NUMBER" ; "unknown category")]
    #[test_case("ABARoutingNumber", "ABA_ROUTING_NUMBER" ; "leading acronym")]
    fn test_map_category(category: &str, expected: &str) {
        assert_eq!(map_category(category), expected);
    }

    fn azure_entity(offset: usize, length: usize) -> AzureEntity {
        AzureEntity {
            category: "Person".to_string(),
            offset,
            length,
            confidence_score: 0.9,
        }
    }

    #[test]
    fn test_to_detected_entity() {
        assert_eq!(
            to_detected_entity(azure_entity(18, 16)),
            Some(DetectedEntity::new("PERSON", 18, 34, 0.9))
        );
        assert_eq!(to_detected_entity(azure_entity(3, 0)), None);
        assert_eq!(to_detected_entity(azure_entity(usize::MAX, 2)), None);
    }

    #[test]
    fn test_analyze_url() {
        let detector = AzureLanguageDetector::new(
            "https://res.cognitiveservices.azure.com/",
            secret_string("key".to_string()),
            10,
        )
        .unwrap();
        assert_eq!(
            detector.analyze_url,
            "https://res.cognitiveservices.azure.com/language/:analyze-text?api-version=2023-04-01&stringIndexType=UnicodeCodePoint"
        );
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = AzureLanguageDetector::new("https://x", secret_string(String::new()), 10)
            .err()
            .unwrap();
        assert!(matches!(err, PiiGuardError::DetectionUnavailable(_)));
    }
}
