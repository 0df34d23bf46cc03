//! Base provider trait and common request types
//!
//! This module defines the Provider trait that generation backends implement,
//! along with the content and sampling types shared by the structured summary
//! request and free-form chat.

use crate::config::SamplingConfig;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role of a content block in a generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Text written by the user
    User,
    /// Text previously produced by the model
    Model,
}

/// A single text part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Part text
    pub text: String,
}

/// One turn of request content
///
/// # Examples
///
/// ```
/// use meeting_summarizer::providers::{Content, Role};
///
/// let content = Content::user("Hello!");
/// assert_eq!(content.role, Role::User);
/// assert_eq!(content.text(), "Hello!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    /// Author of this turn
    pub role: Role,
    /// Text parts of this turn
    pub parts: Vec<Part>,
}

impl Content {
    /// Creates a single-part user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Creates a single-part model turn
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Concatenated text of all parts
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// A complete generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    /// Conversation contents, oldest first
    pub contents: Vec<Content>,
    /// Sampling parameters
    pub sampling: SamplingConfig,
}

impl GenerateRequest {
    /// Create a request from contents and sampling parameters
    pub fn new(contents: Vec<Content>, sampling: SamplingConfig) -> Self {
        Self { contents, sampling }
    }
}

/// Generation backend
///
/// Implementations send one request and return the first candidate's text,
/// or `None` when the reply carries no text at all.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use meeting_summarizer::providers::{GenerateRequest, Provider};
///
/// struct EchoProvider;
///
/// #[async_trait]
/// impl Provider for EchoProvider {
///     async fn generate(
///         &self,
///         request: &GenerateRequest,
///     ) -> meeting_summarizer::error::Result<Option<String>> {
///         Ok(request.contents.last().map(|c| c.text()))
///     }
/// }
/// ```
#[async_trait]
pub trait Provider: Send + Sync {
    /// Send `request` and return the reply text
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint cannot be reached, rejects the request,
    /// or returns a body that is not a generation response
    async fn generate(&self, request: &GenerateRequest) -> Result<Option<String>>;

    /// Name of the model requests are sent to
    fn model_name(&self) -> String {
        "unknown".to_string()
    }
}
