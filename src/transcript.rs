//! Transcript loading
//!
//! A transcript comes either from a document (bytes plus a file name) or from
//! pasted text. Documents with a `.pdf` extension go through a
//! [`TextExtractor`]; anything else is read as UTF-8 text.

use crate::error::{Result, SummarizerError};
use anyhow::Context;
use std::path::Path;

/// Title given to pasted transcripts
pub const PASTED_TITLE: &str = "Pasted Meeting Transcript";

/// Page-ordered text extraction from document bytes
pub trait TextExtractor: Send + Sync {
    /// Return the text of each page, in page order
    ///
    /// # Errors
    ///
    /// Returns error if the bytes are not a readable document
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>>;
}

/// PDF text extractor backed by `lopdf`
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>> {
        let document = lopdf::Document::load_mem(bytes)
            .map_err(|e| SummarizerError::Extraction(format!("Failed to read PDF: {}", e)))?;

        let pages = document.get_pages();
        tracing::debug!("Extracting text from {} PDF pages", pages.len());

        let mut texts = Vec::with_capacity(pages.len());
        for page_number in pages.keys() {
            let text = document.extract_text(&[*page_number]).map_err(|e| {
                SummarizerError::Extraction(format!(
                    "Failed to extract text from page {}: {}",
                    page_number, e
                ))
            })?;
            texts.push(text);
        }

        Ok(texts)
    }
}

/// Where a transcript comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptSource {
    /// A document file
    Document {
        /// File name as shown to the user
        file_name: String,
        /// Raw file contents
        bytes: Vec<u8>,
    },
    /// Text pasted by the user
    Pasted(String),
}

impl TranscriptSource {
    /// Read a document source from disk
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read transcript file {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::Document { file_name, bytes })
    }
}

/// A transcript ready for summarization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTranscript {
    /// Full transcript text
    pub text: String,
    /// Working title
    pub title: String,
    /// Source file name, absent for pasted text
    pub file_name: Option<String>,
}

/// Collapse whitespace runs inside one page to single spaces
fn normalize_page(page: &str) -> String {
    page.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Join page texts with a blank line between consecutive pages
///
/// # Examples
///
/// ```
/// use meeting_summarizer::transcript::join_pages;
///
/// let pages = vec!["one".to_string(), "two  words".to_string()];
/// assert_eq!(join_pages(&pages), "one\n\ntwo words");
/// ```
pub fn join_pages(pages: &[String]) -> String {
    pages
        .iter()
        .map(|p| normalize_page(p))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Working title for a document: its file name without a `.pdf` suffix
///
/// # Examples
///
/// ```
/// use meeting_summarizer::transcript::title_from_file_name;
///
/// assert_eq!(title_from_file_name("Q1 Review.PDF"), "Q1 Review");
/// assert_eq!(title_from_file_name("notes.txt"), "notes.txt");
/// ```
pub fn title_from_file_name(file_name: &str) -> String {
    if file_name.len() >= 4 && file_name.is_char_boundary(file_name.len() - 4) {
        let (stem, ext) = file_name.split_at(file_name.len() - 4);
        if ext.eq_ignore_ascii_case(".pdf") {
            return stem.to_string();
        }
    }
    file_name.to_string()
}

fn is_pdf(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Turn a source into a loaded transcript
///
/// Returns `Ok(None)` for whitespace-only pasted text, which callers ignore.
///
/// # Errors
///
/// Returns [`SummarizerError::Extraction`] when a document cannot be read or
/// yields no text
pub fn load_transcript(
    source: TranscriptSource,
    extractor: &dyn TextExtractor,
) -> Result<Option<LoadedTranscript>> {
    match source {
        TranscriptSource::Pasted(text) => {
            if text.trim().is_empty() {
                return Ok(None);
            }
            Ok(Some(LoadedTranscript {
                text,
                title: PASTED_TITLE.to_string(),
                file_name: None,
            }))
        }
        TranscriptSource::Document { file_name, bytes } => {
            let text = if is_pdf(&file_name) {
                join_pages(&extractor.extract_pages(&bytes)?)
            } else {
                String::from_utf8(bytes).map_err(|e| {
                    SummarizerError::Extraction(format!("{} is not UTF-8 text: {}", file_name, e))
                })?
            };

            if text.trim().is_empty() {
                return Err(SummarizerError::Extraction(format!(
                    "No text found in {}",
                    file_name
                ))
                .into());
            }

            tracing::info!("Loaded transcript {} ({} chars)", file_name, text.len());
            Ok(Some(LoadedTranscript {
                text,
                title: title_from_file_name(&file_name),
                file_name: Some(file_name),
            }))
        }
    }
}
