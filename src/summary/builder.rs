//! Summary request construction and reply decoding
//!
//! Builds the structured `generateContent` request for a transcript, turns
//! the model's reply into a [`MeetingSummary`], and renders the chat turn
//! that announces the result.

use crate::config::SamplingConfig;
use crate::prompts::generate_summary_prompt;
use crate::providers::{Content, GenerateRequest};
use crate::summary::model::{ActionItem, MeetingSummary, ReplyActionItem, SummaryReply};

/// Title used when neither the reply nor the transcript source offers one
pub const DEFAULT_TITLE: &str = "Meeting Summary";

/// Duration used when the reply does not report one
pub const UNKNOWN_DURATION: &str = "Unknown";

/// Assignee used when the reply does not name one
pub const UNASSIGNED: &str = "Unassigned";

/// Summary text of the fallback record
pub const FALLBACK_SUMMARY: &str = "Failed to extract summary from transcript.";

/// Inputs that do not come from the model reply
#[derive(Debug, Clone, Copy)]
pub struct SummaryContext<'a> {
    /// ID to give the new summary
    pub id: i64,
    /// Working title of the loaded transcript
    pub working_title: &'a str,
    /// Today's date, formatted for display
    pub today: &'a str,
    /// Full transcript text
    pub transcript: &'a str,
}

/// Result of decoding one reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOutcome {
    /// The normalized summary record
    pub summary: MeetingSummary,
    /// Key points, shown in the chat turn only
    pub key_points: Vec<String>,
    /// True when the reply was unusable and the fallback was substituted
    pub degraded: bool,
}

/// Build the structured summary request for `transcript`
///
/// # Examples
///
/// ```
/// use meeting_summarizer::config::SamplingConfig;
/// use meeting_summarizer::summary::build_summary_request;
///
/// let request = build_summary_request("Alice: hi", &SamplingConfig::summary());
/// assert_eq!(request.contents.len(), 1);
/// assert!(request.contents[0].text().ends_with("Alice: hi"));
/// ```
pub fn build_summary_request(transcript: &str, sampling: &SamplingConfig) -> GenerateRequest {
    GenerateRequest::new(
        vec![Content::user(generate_summary_prompt(transcript))],
        sampling.clone(),
    )
}

/// Remove every code fence marker and surrounding whitespace
///
/// # Examples
///
/// ```
/// use meeting_summarizer::summary::strip_code_fences;
///
/// assert_eq!(strip_code_fences("```json\n{}\n```"), "{}");
/// ```
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Decode reply text into a [`SummaryReply`]
///
/// Missing text is treated as an empty object.
///
/// # Errors
///
/// Returns the JSON error when the cleaned text is not a valid reply
pub fn parse_summary_reply(text: Option<&str>) -> Result<SummaryReply, serde_json::Error> {
    let cleaned = strip_code_fences(text.unwrap_or("{}"));
    serde_json::from_str(&cleaned)
}

/// The deterministic record substituted for an unusable reply
pub fn fallback_reply(working_title: &str, today: &str) -> SummaryReply {
    SummaryReply {
        title: Some(non_empty(Some(working_title)).unwrap_or(DEFAULT_TITLE).to_string()),
        date: Some(today.to_string()),
        duration: Some(UNKNOWN_DURATION.to_string()),
        participants: Some(Vec::new()),
        summary: Some(FALLBACK_SUMMARY.to_string()),
        key_points: Some(Vec::new()),
        decisions: Some(Vec::new()),
        action_items: Some(Vec::new()),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn normalize_action_items(items: Vec<ReplyActionItem>) -> Vec<ActionItem> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| ActionItem {
            id: index as u32 + 1,
            task: item.task.unwrap_or_default(),
            assignee: non_empty(item.assignee.as_deref())
                .unwrap_or(UNASSIGNED)
                .to_string(),
            due_date: item.due_date.filter(|d| !d.trim().is_empty()),
            completed: false,
        })
        .collect()
}

/// Apply defaults to a decoded reply and produce the archived record
pub fn normalize_reply(reply: SummaryReply, ctx: &SummaryContext<'_>) -> SummaryOutcome {
    let title = non_empty(reply.title.as_deref())
        .or_else(|| non_empty(Some(ctx.working_title)))
        .unwrap_or(DEFAULT_TITLE)
        .to_string();
    let date = non_empty(reply.date.as_deref())
        .unwrap_or(ctx.today)
        .to_string();
    let duration = non_empty(reply.duration.as_deref())
        .unwrap_or(UNKNOWN_DURATION)
        .to_string();

    let summary = MeetingSummary {
        id: ctx.id,
        title,
        date,
        duration,
        summary: reply.summary.unwrap_or_default(),
        action_items: normalize_action_items(reply.action_items.unwrap_or_default()),
        participants: reply.participants.unwrap_or_default(),
        decisions: reply.decisions.unwrap_or_default(),
        raw_transcript: ctx.transcript.to_string(),
    };

    SummaryOutcome {
        summary,
        key_points: reply.key_points.unwrap_or_default(),
        degraded: false,
    }
}

/// Decode reply text into a summary, substituting the fallback on failure
///
/// This never fails: an unusable reply yields the fallback record with
/// `degraded` set.
pub fn summarize_reply(text: Option<&str>, ctx: &SummaryContext<'_>) -> SummaryOutcome {
    match parse_summary_reply(text) {
        Ok(reply) => normalize_reply(reply, ctx),
        Err(e) => {
            tracing::warn!("Failed to parse summary reply, using fallback: {}", e);
            tracing::debug!("Unparseable reply: {:?}", text);
            SummaryOutcome {
                degraded: true,
                ..normalize_reply(fallback_reply(ctx.working_title, ctx.today), ctx)
            }
        }
    }
}

/// Render the chat turn announcing a new summary
pub fn render_summary_markdown(outcome: &SummaryOutcome) -> String {
    let summary = &outcome.summary;

    let bullets = |items: &[String]| {
        items
            .iter()
            .map(|item| format!("- {}", item))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let action_items = summary
        .action_items
        .iter()
        .map(|item| {
            let mut line = format!("{}. **{}**", item.id, item.task);
            if !item.assignee.is_empty() {
                line.push_str(&format!(" (Assigned to: {})", item.assignee));
            }
            if let Some(due) = &item.due_date {
                line.push_str(&format!(" - Due: {}", due));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "## 📝 Meeting Summary: {title}\n\n\
         **Date:** {date}\n\
         **Duration:** {duration}\n\
         **Participants:** {participants}\n\n\
         ### Summary\n{summary}\n\n\
         ### Key Points\n{key_points}\n\n\
         ### Decisions Made\n{decisions}\n\n\
         ### Action Items\n{action_items}",
        title = summary.title,
        date = summary.date,
        duration = summary.duration,
        participants = summary.participants.join(", "),
        summary = summary.summary,
        key_points = bullets(&outcome.key_points),
        decisions = bullets(&summary.decisions),
        action_items = action_items,
    )
}
