//! Test utilities for the meeting summarizer
//!
//! This module provides a scripted provider, a fake text extractor, and
//! storage helpers shared by unit tests.

use crate::error::{Result, SummarizerError};
use crate::providers::{GenerateRequest, Provider};
use crate::storage::{LocalStore, SqliteStorage};
use crate::transcript::TextExtractor;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create SQLite-backed local storage in a temporary directory
///
/// Keep the returned `TempDir` alive for as long as the store is used.
pub fn temp_store() -> (Arc<dyn LocalStore>, TempDir) {
    let dir = temp_dir();
    let storage = SqliteStorage::new_with_path(dir.path().join("storage.db"))
        .expect("Failed to create test storage");
    (Arc::new(storage), dir)
}

/// Store that reads as empty and rejects every write
pub struct ReadOnlyStore;

impl LocalStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: &str) -> Result<()> {
        Err(SummarizerError::Storage(format!("read-only store rejected {}", key)).into())
    }

    fn remove(&self, key: &str) -> Result<()> {
        Err(SummarizerError::Storage(format!("read-only store rejected {}", key)).into())
    }
}

enum Scripted {
    Reply(Option<String>),
    Error(String),
}

/// Provider that replays scripted outcomes and records every request
///
/// Once the script runs out every call returns `Ok(None)`.
pub struct MockProvider {
    script: Mutex<VecDeque<Scripted>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a provider with an empty script
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn push(self, outcome: Scripted) -> Self {
        self.script
            .lock()
            .expect("script lock poisoned")
            .push_back(outcome);
        self
    }

    /// Queue a text reply
    pub fn with_reply(self, text: &str) -> Self {
        self.push(Scripted::Reply(Some(text.to_string())))
    }

    /// Queue a reply without text
    pub fn with_empty_reply(self) -> Self {
        self.push(Scripted::Reply(None))
    }

    /// Queue a provider failure
    pub fn with_error(self, message: &str) -> Self {
        self.push(Scripted::Error(message.to_string()))
    }

    /// Shared handle to the recorded requests
    pub fn requests(&self) -> Arc<Mutex<Vec<GenerateRequest>>> {
        self.requests.clone()
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<Option<String>> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(request.clone());

        let next = self
            .script
            .lock()
            .expect("script lock poisoned")
            .pop_front();
        match next {
            Some(Scripted::Reply(text)) => Ok(text),
            Some(Scripted::Error(message)) => Err(SummarizerError::Provider(message).into()),
            None => Ok(None),
        }
    }

    fn model_name(&self) -> String {
        "mock-model".to_string()
    }
}

/// Text extractor returning fixed pages, or failing
pub struct FakeExtractor {
    pages: Option<Vec<String>>,
}

impl FakeExtractor {
    /// Extractor that returns `pages` for any input
    pub fn pages(pages: &[&str]) -> Self {
        Self {
            pages: Some(pages.iter().map(|p| p.to_string()).collect()),
        }
    }

    /// Extractor that rejects every input
    pub fn failing() -> Self {
        Self { pages: None }
    }
}

impl TextExtractor for FakeExtractor {
    fn extract_pages(&self, _bytes: &[u8]) -> Result<Vec<String>> {
        self.pages
            .clone()
            .ok_or_else(|| SummarizerError::Extraction("unreadable document".to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SamplingConfig;
    use crate::providers::Content;

    #[test]
    fn test_mock_provider_replays_script() {
        let provider = MockProvider::new().with_reply("a").with_error("b");
        let requests = provider.requests();
        let request = GenerateRequest::new(vec![Content::user("x")], SamplingConfig::chat());

        let first = tokio_test::block_on(provider.generate(&request)).unwrap();
        assert_eq!(first.as_deref(), Some("a"));
        assert!(tokio_test::block_on(provider.generate(&request)).is_err());
        assert!(tokio_test::block_on(provider.generate(&request))
            .unwrap()
            .is_none());
        assert_eq!(requests.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_fake_extractor() {
        assert_eq!(FakeExtractor::pages(&["a"]).extract_pages(b"").unwrap(), vec!["a"]);
        assert!(FakeExtractor::failing().extract_pages(b"").is_err());
    }

    #[test]
    fn test_temp_store() {
        let (store, _dir) = temp_store();
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }
}
