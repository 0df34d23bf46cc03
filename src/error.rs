//! Error types for the meeting summarizer
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for meeting summarizer operations
///
/// Covers configuration loading, generation endpoint calls, transcript
/// extraction, local storage, and lookups against the archive.
#[derive(Error, Debug)]
pub enum SummarizerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (API calls, missing key, bad status)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Document text extraction failed
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Local storage errors (database operations)
    #[error("Storage error: {0}")]
    Storage(String),

    /// A summary or action item could not be found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Summarization was requested without a loaded transcript
    #[error("No transcript available")]
    NoTranscript,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for meeting summarizer operations
///
/// Uses `anyhow::Error` as the error type so callers can attach context
/// while still downcasting to [`SummarizerError`] where needed.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = SummarizerError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_provider_error_display() {
        let error = SummarizerError::Provider("API timeout".to_string());
        assert_eq!(error.to_string(), "Provider error: API timeout");
    }

    #[test]
    fn test_extraction_error_display() {
        let error = SummarizerError::Extraction("not a PDF".to_string());
        assert_eq!(error.to_string(), "Extraction error: not a PDF");
    }

    #[test]
    fn test_not_found_error_display() {
        let error = SummarizerError::NotFound("summary 42".to_string());
        assert_eq!(error.to_string(), "Not found: summary 42");
    }

    #[test]
    fn test_no_transcript_display() {
        assert_eq!(
            SummarizerError::NoTranscript.to_string(),
            "No transcript available"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: SummarizerError = io_error.into();
        assert!(matches!(error, SummarizerError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: SummarizerError = json_error.into();
        assert!(matches!(error, SummarizerError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: SummarizerError = yaml_error.into();
        assert!(matches!(error, SummarizerError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SummarizerError>();
    }

    #[test]
    fn test_storage_error_display() {
        let error = SummarizerError::Storage("database connection failed".to_string());
        assert_eq!(
            error.to_string(),
            "Storage error: database connection failed"
        );
    }
}
