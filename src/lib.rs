//! Meeting Summarizer - meeting transcript assistant library
//!
//! This library provides the core functionality for the meeting summarizer:
//! loading transcripts, asking a generation model for a structured summary,
//! keeping an archive of summaries with checkable action items, and chatting
//! about the loaded transcript.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `app`: Session controller that owns all state and action handlers
//! - `transcript`: Document and pasted-text loading
//! - `summary`: Summary records, request building, reply decoding, export
//! - `conversation`: Chat history and chat request construction
//! - `archive`: Persistent summary archive
//! - `providers`: Generation provider abstraction and the Gemini client
//! - `storage`: Local key/value storage
//! - `render`: Terminal rendering
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use meeting_summarizer::commands::build_app;
//! use meeting_summarizer::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let mut app = build_app(&config)?;
//!     app.paste_transcript("Alice: I'll send the report by Friday.");
//!     if let Some(id) = app.generate_summary().await {
//!         println!("Archived summary {}", id);
//!     }
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod archive;
pub mod cli;
pub mod commands;
pub mod config;
pub mod conversation;
pub mod error;
pub mod prompts;
pub mod providers;
pub mod render;
pub mod storage;
pub mod summary;
pub mod theme;
pub mod transcript;

// Re-export commonly used types
pub use app::{App, Notice, NoticeKind, View};
pub use config::Config;
pub use error::{Result, SummarizerError};
pub use summary::{ActionItem, MeetingSummary};
pub use theme::Theme;

#[cfg(test)]
pub mod test_utils;
