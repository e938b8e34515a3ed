//! Azure AI Language integration

pub mod language;

pub use language::AzureLanguageDetector;
