//! Configuration management for the meeting summarizer
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, SummarizerError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
///
/// Holds the provider settings, the sampling parameters for the two
/// generation modes, and the local storage location.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Sampling parameters for structured and free-form requests
    #[serde(default)]
    pub generation: GenerationSettings,
    /// Local storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Provider configuration
///
/// Specifies which generation provider to use and its settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Type of provider to use
    #[serde(rename = "type", default = "default_provider_type")]
    pub provider_type: String,

    /// Gemini configuration
    #[serde(default)]
    pub gemini: GeminiConfig,
}

fn default_provider_type() -> String {
    "gemini".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: default_provider_type(),
            gemini: GeminiConfig::default(),
        }
    }
}

/// Gemini `generateContent` provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API base URL (overridable for tests and proxies)
    #[serde(default = "default_gemini_api_base")]
    pub api_base: String,

    /// Model to use
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API key; usually supplied through `GEMINI_API_KEY`
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_gemini_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_timeout_seconds() -> u64 {
    120
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base: default_gemini_api_base(),
            model: default_gemini_model(),
            api_key: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Sampling parameters for both generation modes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Structured summary requests
    #[serde(default = "SamplingConfig::summary")]
    pub summary: SamplingConfig,

    /// Free-form chat requests
    #[serde(default = "SamplingConfig::chat")]
    pub chat: SamplingConfig,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            summary: SamplingConfig::summary(),
            chat: SamplingConfig::chat(),
        }
    }
}

/// Sampling parameters sent as `generationConfig`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Sampling temperature
    pub temperature: f32,
    /// Top-k cutoff
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    /// Nucleus sampling cutoff
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// Maximum tokens in the reply
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Requested reply MIME type
    #[serde(default)]
    pub response_mime_type: Option<String>,
}

fn default_top_k() -> u32 {
    40
}

fn default_top_p() -> f32 {
    0.95
}

fn default_max_output_tokens() -> u32 {
    8192
}

impl SamplingConfig {
    /// Low-temperature settings for structured summaries
    pub fn summary() -> Self {
        Self {
            temperature: 0.2,
            top_k: default_top_k(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
            response_mime_type: None,
        }
    }

    /// Higher-temperature plain-text settings for free-form chat
    pub fn chat() -> Self {
        Self {
            temperature: 0.7,
            top_k: default_top_k(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
            response_mime_type: Some("text/plain".to_string()),
        }
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(SummarizerError::Config(format!(
                "generation.{}.temperature must be between 0.0 and 2.0",
                name
            ))
            .into());
        }

        if self.top_p <= 0.0 || self.top_p > 1.0 {
            return Err(SummarizerError::Config(format!(
                "generation.{}.top_p must be between 0.0 and 1.0",
                name
            ))
            .into());
        }

        if self.max_output_tokens == 0 {
            return Err(SummarizerError::Config(format!(
                "generation.{}.max_output_tokens must be greater than 0",
                name
            ))
            .into());
        }

        Ok(())
    }
}

/// Local storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Database path; the platform data directory is used when unset
    #[serde(default)]
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// # Arguments
    ///
    /// * `path` - Path to configuration file
    /// * `cli` - CLI arguments for overrides
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SummarizerError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| SummarizerError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            if !api_key.trim().is_empty() {
                self.provider.gemini.api_key = Some(api_key);
            }
        }

        if let Ok(model) = std::env::var("MEETING_SUMMARIZER_MODEL") {
            self.provider.gemini.model = model;
        }

        if let Ok(api_base) = std::env::var("MEETING_SUMMARIZER_API_BASE") {
            self.provider.gemini.api_base = api_base;
        }

        if let Ok(path) = std::env::var("MEETING_SUMMARIZER_STORAGE") {
            tracing::debug!(path = %path, "Env override: MEETING_SUMMARIZER_STORAGE");
            self.storage.path = Some(path);
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(model) = &cli.model {
            self.provider.gemini.model = model.clone();
        }

        if let Some(path) = &cli.storage_path {
            self.storage.path = Some(path.clone());
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any validation check fails
    pub fn validate(&self) -> Result<()> {
        if self.provider.provider_type.is_empty() {
            return Err(
                SummarizerError::Config("Provider type cannot be empty".to_string()).into(),
            );
        }

        let valid_providers = ["gemini"];
        if !valid_providers.contains(&self.provider.provider_type.as_str()) {
            return Err(SummarizerError::Config(format!(
                "Invalid provider type: {}. Must be one of: {}",
                self.provider.provider_type,
                valid_providers.join(", ")
            ))
            .into());
        }

        if self.provider.gemini.model.trim().is_empty() {
            return Err(SummarizerError::Config("gemini.model cannot be empty".to_string()).into());
        }

        if self.provider.gemini.timeout_seconds == 0 {
            return Err(SummarizerError::Config(
                "gemini.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        self.generation.summary.validate("summary")?;
        self.generation.chat.validate("chat")?;

        Ok(())
    }
}
