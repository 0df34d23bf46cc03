//! Prompts and fixed conversation text
//!
//! This module holds the structured summary instruction and the canned
//! messages the assistant adds around user actions.

pub mod messages;
pub mod summary_prompt;

pub use summary_prompt::generate_summary_prompt;
