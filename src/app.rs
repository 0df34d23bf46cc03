//! Application controller
//!
//! [`App`] owns every piece of session state: the conversation, the loaded
//! transcript, the archive, the current summary, the active view and the
//! theme. All mutations go through `&mut self` handlers, so one action runs
//! to completion before the next can start.
//!
//! Recoverable failures never escape a handler. They become either a chat
//! turn (generation failures) or a [`Notice`] that the front end drains and
//! shows.

use crate::archive::ArchiveStore;
use crate::config::GenerationSettings;
use crate::conversation::Conversation;
use crate::error::Result;
use crate::prompts::messages;
use crate::providers::{GenerateRequest, Provider};
use crate::storage::LocalStore;
use crate::summary::{
    self, build_summary_request, render_summary_markdown, summarize_reply, MeetingSummary,
    SummaryContext,
};
use crate::theme::Theme;
use crate::transcript::{load_transcript, LoadedTranscript, TextExtractor, TranscriptSource};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Which of the three views is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Conversation
    #[default]
    Chat,
    /// Current summary
    Summary,
    /// Archived summaries
    Archive,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chat => write!(f, "chat"),
            Self::Summary => write!(f, "summary"),
            Self::Archive => write!(f, "archive"),
        }
    }
}

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Neutral information
    Info,
    /// An action succeeded
    Success,
    /// An action failed
    Error,
}

/// Transient message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub kind: NoticeKind,
    /// Short headline
    pub title: String,
    /// Optional detail line
    pub description: Option<String>,
}

impl Notice {
    fn new(kind: NoticeKind, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description,
        }
    }
}

/// Headline of the notice raised when a document cannot be read
pub const EXTRACTION_FAILED: &str = "Failed to parse the PDF file. Please try again with a different file.";

/// Headline of the notice raised when summarizing without a transcript
pub const NO_TRANSCRIPT: &str = "No transcript available";

/// Detail of the notice raised when summarizing without a transcript
pub const NO_TRANSCRIPT_DETAIL: &str = "Please upload a meeting transcript first or paste text";

/// Headline of the notice raised after deleting a summary
pub const SUMMARY_DELETED: &str = "Summary deleted";

const NO_ACTIVE_SUMMARY: &str = "No summary selected";

/// Session state and action handlers
pub struct App {
    provider: Box<dyn Provider>,
    extractor: Box<dyn TextExtractor>,
    store: Arc<dyn LocalStore>,
    generation: GenerationSettings,
    conversation: Conversation,
    archive: ArchiveStore,
    transcript: Option<LoadedTranscript>,
    current_summary: Option<MeetingSummary>,
    view: View,
    theme: Theme,
    notices: Vec<Notice>,
    // X11 and Wayland only serve copied text while the owner is alive
    clipboard: Option<arboard::Clipboard>,
}

impl App {
    /// Create a session, loading the archive and theme from `store`
    ///
    /// # Errors
    ///
    /// Returns error if local storage cannot be read
    pub fn new(
        provider: Box<dyn Provider>,
        extractor: Box<dyn TextExtractor>,
        store: Arc<dyn LocalStore>,
        generation: GenerationSettings,
    ) -> Result<Self> {
        let archive = ArchiveStore::load(store.clone())?;
        let theme = Theme::load(store.as_ref())?;

        tracing::info!(
            "Session started: model={}, {} archived summaries, theme={}",
            provider.model_name(),
            archive.len(),
            theme
        );

        Ok(Self {
            provider,
            extractor,
            store,
            generation,
            conversation: Conversation::new(),
            archive,
            transcript: None,
            current_summary: None,
            view: View::Chat,
            theme,
            notices: Vec::new(),
            clipboard: None,
        })
    }

    fn notify(&mut self, kind: NoticeKind, title: impl Into<String>, description: Option<String>) {
        self.notices.push(Notice::new(kind, title, description));
    }

    fn notify_error(&mut self, title: &str, error: &anyhow::Error) {
        tracing::error!("{}: {:#}", title, error);
        self.notify(NoticeKind::Error, title, Some(format!("{:#}", error)));
    }

    /// The conversation
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// The archive
    pub fn archive(&self) -> &ArchiveStore {
        &self.archive
    }

    /// The loaded transcript, if any
    pub fn transcript(&self) -> Option<&LoadedTranscript> {
        self.transcript.as_ref()
    }

    /// The summary shown in the summary view, if any
    pub fn current_summary(&self) -> Option<&MeetingSummary> {
        self.current_summary.as_ref()
    }

    /// The active view
    pub fn view(&self) -> View {
        self.view
    }

    /// The active theme
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Name of the model requests go to
    pub fn model_name(&self) -> String {
        self.provider.model_name()
    }

    /// Take all pending notices
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Load a document as the active transcript
    ///
    /// On failure a notice is raised and no state changes. Returns whether a
    /// transcript was loaded.
    pub fn load_document(&mut self, file_name: impl Into<String>, bytes: Vec<u8>) -> bool {
        let source = TranscriptSource::Document {
            file_name: file_name.into(),
            bytes,
        };
        self.load_source(source)
    }

    /// Read `path` and load it as the active transcript
    pub fn load_file(&mut self, path: &Path) -> bool {
        match TranscriptSource::from_path(path) {
            Ok(source) => self.load_source(source),
            Err(e) => {
                tracing::error!("Failed to read {}: {:#}", path.display(), e);
                self.notify(NoticeKind::Error, EXTRACTION_FAILED, Some(format!("{:#}", e)));
                false
            }
        }
    }

    /// Use pasted text as the active transcript
    ///
    /// Whitespace-only text is ignored. Returns whether a transcript was
    /// loaded.
    pub fn paste_transcript(&mut self, text: impl Into<String>) -> bool {
        self.load_source(TranscriptSource::Pasted(text.into()))
    }

    fn load_source(&mut self, source: TranscriptSource) -> bool {
        match load_transcript(source, self.extractor.as_ref()) {
            Ok(Some(loaded)) => {
                match &loaded.file_name {
                    Some(file_name) => {
                        self.conversation
                            .push_user(messages::uploaded_ack_user(file_name));
                        self.conversation
                            .push_assistant(messages::uploaded_ack_assistant(file_name));
                    }
                    None => {
                        self.conversation.push_user(messages::PASTED_ACK_USER);
                        self.conversation
                            .push_assistant(messages::pasted_ack_assistant());
                    }
                }
                self.transcript = Some(loaded);
                true
            }
            Ok(None) => {
                tracing::debug!("Ignoring blank pasted transcript");
                false
            }
            Err(e) => {
                tracing::error!("Transcript extraction failed: {:#}", e);
                self.notify(NoticeKind::Error, EXTRACTION_FAILED, None);
                false
            }
        }
    }

    /// Summarize the active transcript
    ///
    /// On success the summary is archived, becomes current and the view
    /// switches to it. Returns the new summary's ID, or `None` when
    /// generation or saving fails.
    pub async fn generate_summary(&mut self) -> Option<i64> {
        let Some(transcript) = self.transcript.clone() else {
            self.notify(
                NoticeKind::Info,
                NO_TRANSCRIPT,
                Some(NO_TRANSCRIPT_DETAIL.to_string()),
            );
            return None;
        };

        self.conversation.push_user(messages::SUMMARY_REQUEST);

        let request = build_summary_request(&transcript.text, &self.generation.summary);
        let reply = match self.provider.generate(&request).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Summary generation failed: {:#}", e);
                self.conversation.push_assistant(messages::SUMMARY_ERROR);
                return None;
            }
        };

        let now_millis = chrono::Utc::now().timestamp_millis();
        let today = summary::today();
        let ctx = SummaryContext {
            id: summary::next_summary_id(now_millis, self.archive.ids()),
            working_title: &transcript.title,
            today: &today,
            transcript: &transcript.text,
        };
        let outcome = summarize_reply(reply.as_deref(), &ctx);

        self.conversation
            .push_assistant(render_summary_markdown(&outcome));

        let summary = outcome.summary;
        let id = summary.id;
        if let Err(e) = self.archive.append(summary.clone()) {
            self.notify_error("Failed to save summary", &e);
            return None;
        }
        self.current_summary = Some(summary);
        self.view = View::Summary;

        Some(id)
    }

    /// Send a free-form chat message
    ///
    /// Blank input is ignored. The reply, or a fixed error message, is
    /// appended as an assistant turn.
    pub async fn send_message(&mut self, input: &str) {
        let input = input.trim();
        if input.is_empty() {
            return;
        }

        let contents = self.conversation.to_request_contents(
            input,
            self.transcript.as_ref().map(|t| t.text.as_str()),
        );
        self.conversation.push_user(input);

        let request = GenerateRequest::new(contents, self.generation.chat.clone());
        let reply = match self.provider.generate(&request).await {
            Ok(Some(text)) => text,
            Ok(None) => messages::EMPTY_REPLY.to_string(),
            Err(e) => {
                tracing::error!("Chat request failed: {:#}", e);
                messages::CHAT_ERROR.to_string()
            }
        };
        self.conversation.push_assistant(reply);
    }

    /// Reset the conversation and drop the active transcript
    pub fn clear_chat(&mut self) {
        self.conversation.clear();
        self.transcript = None;
    }

    /// Start over: drop the current summary and transcript, back to chat
    pub fn new_summary_flow(&mut self) {
        self.current_summary = None;
        self.transcript = None;
        self.view = View::Chat;
    }

    /// Switch the active view
    pub fn switch_view(&mut self, view: View) {
        self.view = view;
    }

    /// Make an archived summary current and show it
    pub fn select_summary(&mut self, id: i64) -> bool {
        match self.archive.get(id) {
            Some(found) => {
                self.current_summary = Some(found.clone());
                self.view = View::Summary;
                true
            }
            None => {
                self.notify(
                    NoticeKind::Error,
                    format!("No summary with ID {}", id),
                    None,
                );
                false
            }
        }
    }

    /// Flip an action item in the archive and in the current summary
    pub fn toggle_action_item(&mut self, summary_id: i64, item_id: u32) -> bool {
        match self.archive.toggle_action_item(summary_id, item_id) {
            Ok(_) => {
                if let Some(current) = &self.current_summary {
                    if current.id == summary_id {
                        self.current_summary = current.with_item_toggled(item_id);
                    }
                }
                true
            }
            Err(e) => {
                self.notify_error("Could not update action item", &e);
                false
            }
        }
    }

    /// Delete an archived summary
    ///
    /// Clears the current summary when it is the one deleted.
    pub fn delete_summary(&mut self, id: i64) -> bool {
        match self.archive.remove(id) {
            Ok(_) => {
                if self.current_summary.as_ref().map(|s| s.id) == Some(id) {
                    self.current_summary = None;
                }
                self.notify(
                    NoticeKind::Info,
                    SUMMARY_DELETED,
                    Some("The meeting summary has been deleted.".to_string()),
                );
                true
            }
            Err(e) => {
                self.notify_error("Could not delete summary", &e);
                false
            }
        }
    }

    /// Set and persist the theme
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Err(e) = theme.save(self.store.as_ref()) {
            self.notify_error("Could not save theme", &e);
        }
    }

    /// Switch between dark and light
    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme.toggled());
    }

    fn require_current(&mut self) -> Option<MeetingSummary> {
        if self.current_summary.is_none() {
            self.notify(NoticeKind::Info, NO_ACTIVE_SUMMARY, None);
        }
        self.current_summary.clone()
    }

    /// Write the current summary as JSON into `dir`
    pub fn export_current(&mut self, dir: &Path) -> Option<PathBuf> {
        let current = self.require_current()?;
        match summary::write_export(&current, dir) {
            Ok(path) => {
                self.notify(
                    NoticeKind::Success,
                    "Summary exported",
                    Some(path.display().to_string()),
                );
                Some(path)
            }
            Err(e) => {
                self.notify_error("Export failed", &e);
                None
            }
        }
    }

    /// Open an email draft for the current summary
    ///
    /// Returns the `mailto:` URL whether or not a handler opened it.
    pub fn email_current(&mut self) -> Option<String> {
        let current = self.require_current()?;
        match summary::open_email_draft(&current) {
            Ok(url) => Some(url),
            Err(e) => {
                self.notify_error("Could not open a mail client", &e);
                Some(summary::mailto_url(&current))
            }
        }
    }

    /// Copy the current summary's text to the clipboard
    pub fn copy_summary(&mut self) -> bool {
        let Some(current) = self.require_current() else {
            return false;
        };

        let copied = match self.clipboard.take() {
            Some(clipboard) => Ok(clipboard),
            None => arboard::Clipboard::new(),
        }
        .and_then(|mut clipboard| {
            let result = clipboard.set_text(current.summary.clone());
            self.clipboard = Some(clipboard);
            result
        });
        match copied {
            Ok(()) => {
                self.notify(
                    NoticeKind::Success,
                    "Copied to clipboard",
                    Some("The content has been copied to your clipboard.".to_string()),
                );
                true
            }
            Err(e) => {
                tracing::warn!("Clipboard unavailable: {}", e);
                self.notify(
                    NoticeKind::Error,
                    "Could not copy to clipboard",
                    Some(e.to_string()),
                );
                false
            }
        }
    }
}
