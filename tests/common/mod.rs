use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use meeting_summarizer::config::GeminiConfig;
use meeting_summarizer::storage::{LocalStore, SqliteStorage};
use meeting_summarizer::transcript::TextExtractor;

#[allow(dead_code)]
pub const TEST_MODEL: &str = "gemini-test";

#[allow(dead_code)]
pub const TEST_KEY: &str = "test-key";

#[allow(dead_code)]
pub fn create_temp_storage() -> (SqliteStorage, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let db_path = tmp.path().join("storage.db");
    let storage =
        SqliteStorage::new_with_path(db_path).expect("failed to create sqlite storage with path");
    (storage, tmp)
}

#[allow(dead_code)]
pub fn shared_storage(dir: &TempDir) -> Arc<dyn LocalStore> {
    Arc::new(
        SqliteStorage::new_with_path(dir.path().join("storage.db"))
            .expect("failed to open sqlite storage"),
    )
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Gemini settings pointing at a mock server
#[allow(dead_code)]
pub fn gemini_config(api_base: &str) -> GeminiConfig {
    GeminiConfig {
        api_base: api_base.to_string(),
        model: TEST_MODEL.to_string(),
        api_key: Some(TEST_KEY.to_string()),
        timeout_seconds: 5,
    }
}

/// Endpoint path requests for the test model go to
#[allow(dead_code)]
pub fn generate_path() -> String {
    format!("/v1beta/models/{}:generateContent", TEST_MODEL)
}

/// `generateContent` response body carrying `text`
#[allow(dead_code)]
pub fn gemini_reply(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": text }]
            },
            "finishReason": "STOP"
        }]
    })
}

/// Extractor returning fixed page texts
#[allow(dead_code)]
pub struct StaticPages(pub Vec<&'static str>);

impl TextExtractor for StaticPages {
    fn extract_pages(&self, _bytes: &[u8]) -> meeting_summarizer::Result<Vec<String>> {
        Ok(self.0.iter().map(|p| p.to_string()).collect())
    }
}
