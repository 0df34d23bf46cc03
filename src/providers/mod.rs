//! Provider module
//!
//! This module contains the generation provider abstraction and the Gemini
//! implementation.

pub mod base;
pub mod gemini;

pub use base::{Content, GenerateRequest, Part, Provider, Role};
pub use gemini::GeminiProvider;

use crate::config::ProviderConfig;
use crate::error::Result;

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `config` - Provider configuration
///
/// # Errors
///
/// Returns error if provider type is invalid or initialization fails
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    match config.provider_type.as_str() {
        "gemini" => Ok(Box::new(GeminiProvider::new(config.gemini.clone())?)),
        other => Err(crate::error::SummarizerError::Provider(format!(
            "Unknown provider type: {}",
            other
        ))
        .into()),
    }
}
