//! Gemini provider implementation
//!
//! This module implements the Provider trait for Google's `generateContent`
//! endpoint. Requests carry the conversation contents and a
//! `generationConfig`; the reply text is the first part of the first
//! candidate.

use crate::config::{GeminiConfig, SamplingConfig};
use crate::error::{Result, SummarizerError};
use crate::providers::{Content, GenerateRequest, Provider};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini API provider
///
/// # Examples
///
/// ```no_run
/// use meeting_summarizer::config::{GeminiConfig, SamplingConfig};
/// use meeting_summarizer::providers::{Content, GeminiProvider, GenerateRequest, Provider};
///
/// # async fn example() -> meeting_summarizer::error::Result<()> {
/// let config = GeminiConfig {
///     api_key: Some("my-key".to_string()),
///     ..Default::default()
/// };
/// let provider = GeminiProvider::new(config)?;
/// let request = GenerateRequest::new(vec![Content::user("Hello!")], SamplingConfig::chat());
/// let reply = provider.generate(&request).await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: &'a [Content],
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig<'a>,
}

/// `generationConfig` block
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig<'a> {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
}

impl<'a> From<&'a SamplingConfig> for GeminiGenerationConfig<'a> {
    fn from(sampling: &'a SamplingConfig) -> Self {
        Self {
            temperature: sampling.temperature,
            top_k: sampling.top_k,
            top_p: sampling.top_p,
            max_output_tokens: sampling.max_output_tokens,
            response_mime_type: sampling.response_mime_type.as_deref(),
        }
    }
}

/// Response body from `generateContent`
#[derive(Debug, Deserialize, Default)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiResponse {
    /// Text of the first part of the first candidate, if non-empty
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.is_empty())
    }
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("meeting-summarizer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                SummarizerError::Provider(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized Gemini provider: api_base={}, model={}",
            config.api_base,
            config.model
        );

        Ok(Self { client, config })
    }

    /// Endpoint URL; the API key travels in a header, never in the URL
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<Option<String>> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            SummarizerError::Provider(
                "No API key configured; set GEMINI_API_KEY or provider.gemini.api_key".to_string(),
            )
        })?;

        let body = GeminiRequest {
            contents: &request.contents,
            generation_config: GeminiGenerationConfig::from(&request.sampling),
        };

        tracing::debug!(
            "Sending Gemini request: {} contents, temperature={}",
            request.contents.len(),
            request.sampling.temperature
        );

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                tracing::error!("Gemini request failed: {}", e);
                SummarizerError::Provider(format!("Gemini request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini returned error {}: {}", status, error_text);
            return Err(SummarizerError::Provider(format!(
                "Gemini returned error {}: {}",
                status, error_text
            ))
            .into());
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to parse Gemini response: {}", e);
            SummarizerError::Provider(format!("Failed to parse Gemini response: {}", e))
        })?;

        let text = gemini_response.first_text();
        tracing::debug!(
            "Gemini response: {} chars",
            text.as_ref().map(|t| t.len()).unwrap_or(0)
        );

        Ok(text)
    }

    fn model_name(&self) -> String {
        self.config.model.clone()
    }
}
