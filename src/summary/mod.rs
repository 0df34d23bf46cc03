//! Meeting summary records
//!
//! The summary module holds the archived record types, the structured
//! request and reply handling used to produce them, and the export and
//! email helpers that operate on a finished record.

pub mod builder;
pub mod export;
pub mod model;

pub use builder::{
    build_summary_request, fallback_reply, normalize_reply, parse_summary_reply,
    render_summary_markdown, strip_code_fences, summarize_reply, SummaryContext, SummaryOutcome,
};
pub use export::{
    email_body, email_subject, export_file_name, export_json, mailto_url, open_email_draft,
    write_export,
};
pub use model::{ActionItem, MeetingSummary, ReplyActionItem, SummaryReply};

use chrono::Local;

/// Today's local date as `M/D/YYYY`
pub fn today() -> String {
    Local::now().format("%-m/%-d/%Y").to_string()
}

/// Current local time as `HH:MM`
pub fn timestamp() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Choose an ID for a new summary
///
/// Uses `now_millis` unless an existing ID is equal or greater, in which
/// case the result is one past the largest existing ID.
///
/// # Examples
///
/// ```
/// use meeting_summarizer::summary::next_summary_id;
///
/// assert_eq!(next_summary_id(100, [10, 20]), 100);
/// assert_eq!(next_summary_id(100, [100]), 101);
/// ```
pub fn next_summary_id(now_millis: i64, existing: impl IntoIterator<Item = i64>) -> i64 {
    match existing.into_iter().max() {
        Some(max) if max >= now_millis => max + 1,
        _ => now_millis,
    }
}
