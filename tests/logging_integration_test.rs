//! Integration tests for logging functionality

use piiguard::config::LoggingConfig;
use piiguard::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert_eq!(config.local_path, "./logs");
}

#[test]
fn test_invalid_level_rejected_before_install() {
    let err = init_logging("verbose", &LoggingConfig::default()).unwrap_err();
    assert!(err.to_string().contains("Invalid log level: verbose"));
}

// Only this test installs the global subscriber.
#[test]
fn test_local_logging_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("debug", &config).unwrap();
    tracing::info!(entities = 2, "Detection completed");
    drop(guard);

    assert!(log_path.is_dir());
}
