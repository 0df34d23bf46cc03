//! JSON export and email handoff for a summary

use crate::error::{Result, SummarizerError};
use crate::summary::model::MeetingSummary;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Replace characters that cannot appear in a file name with `_`
///
/// Whitespace runs collapse to a single `_`. Path separators, the characters
/// Windows reserves and control characters are each replaced.
fn file_name_part(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// File name used when exporting `summary` as JSON
///
/// Whitespace runs in the title become `_` and slashes in the date become
/// `-`. Characters not allowed in file names become `_`, so the result is
/// always a single path component.
///
/// # Examples
///
/// ```
/// use meeting_summarizer::summary::{export_file_name, MeetingSummary};
///
/// let summary = MeetingSummary {
///     id: 1,
///     title: "Q1   Review".into(),
///     date: "1/5/2024".into(),
///     duration: "30 min".into(),
///     summary: String::new(),
///     action_items: vec![],
///     participants: vec![],
///     decisions: vec![],
///     raw_transcript: String::new(),
/// };
/// assert_eq!(export_file_name(&summary), "Q1_Review_1-5-2024.json");
/// ```
pub fn export_file_name(summary: &MeetingSummary) -> String {
    let title = file_name_part(&summary.title);
    let title = if title.trim_matches('.').is_empty() {
        "meeting".to_string()
    } else {
        title
    };
    let date = file_name_part(&summary.date.replace('/', "-"));
    format!("{}_{}.json", title, date)
}

/// Pretty-printed JSON document for `summary`
///
/// # Errors
///
/// Returns error if serialization fails
pub fn export_json(summary: &MeetingSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Write `summary` as JSON into `dir` and return the written path
///
/// # Errors
///
/// Returns error if the directory cannot be created or the file cannot be
/// written
pub fn write_export(summary: &MeetingSummary, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let name = export_file_name(summary);
    if Path::new(&name).components().count() != 1 {
        return Err(SummarizerError::Storage(format!("Invalid export file name {}", name)).into());
    }
    let path = dir.join(name);
    let json = export_json(summary)?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write export file {}", path.display()))
        .map_err(|e| SummarizerError::Storage(e.to_string()))?;

    tracing::info!("Exported summary {} to {}", summary.id, path.display());
    Ok(path)
}

/// Email subject line for `summary`
pub fn email_subject(summary: &MeetingSummary) -> String {
    format!("Meeting Summary: {} - {}", summary.title, summary.date)
}

/// Plain-text email body for `summary`
pub fn email_body(summary: &MeetingSummary) -> String {
    let decisions = summary
        .decisions
        .iter()
        .enumerate()
        .map(|(i, decision)| format!("{}. {}", i + 1, decision))
        .collect::<Vec<_>>()
        .join("\n");

    let action_items = summary
        .action_items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let due = item
                .due_date
                .as_ref()
                .map(|d| format!(" (Due: {})", d))
                .unwrap_or_default();
            format!(
                "{}. {} - Assigned to: {}{}",
                i + 1,
                item.task,
                item.assignee,
                due
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\nDear Team,\n\n\
         Here's a summary of our recent meeting:\n\n\
         MEETING: {title}\n\
         DATE: {date}\n\
         DURATION: {duration}\n\
         PARTICIPANTS: {participants}\n\n\
         SUMMARY:\n{summary}\n\n\
         KEY DECISIONS:\n{decisions}\n\n\
         ACTION ITEMS:\n{action_items}\n\n\
         Please let me know if you have any questions or need clarification on any points.\n\n\
         Best regards,\n\
         [Your Name]\n",
        title = summary.title,
        date = summary.date,
        duration = summary.duration,
        participants = summary.participants.join(", "),
        summary = summary.summary,
        decisions = decisions,
        action_items = action_items,
    )
}

/// `mailto:` URL carrying the subject and body, percent-encoded
pub fn mailto_url(summary: &MeetingSummary) -> String {
    format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(&email_subject(summary)),
        urlencoding::encode(&email_body(summary))
    )
}

/// Hand the email draft for `summary` to the default mail handler
///
/// Returns the URL so callers can show it when no handler is available.
///
/// # Errors
///
/// Returns error if the platform handler cannot be launched
pub fn open_email_draft(summary: &MeetingSummary) -> Result<String> {
    let url = mailto_url(summary);
    webbrowser::open(&url)
        .map_err(|e| SummarizerError::Provider(format!("Failed to open mail handler: {}", e)))?;
    tracing::info!("Opened email draft for summary {}", summary.id);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::model::ActionItem;
    use tempfile::tempdir;

    fn sample() -> MeetingSummary {
        MeetingSummary {
            id: 1704412800000,
            title: "Q1 Review".to_string(),
            date: "1/5/2024".to_string(),
            duration: "30 min".to_string(),
            summary: "Reviewed the quarter.".to_string(),
            action_items: vec![
                ActionItem {
                    id: 1,
                    task: "Send report".to_string(),
                    assignee: "Alice".to_string(),
                    due_date: Some("Friday".to_string()),
                    completed: false,
                },
                ActionItem {
                    id: 2,
                    task: "Book room".to_string(),
                    assignee: "Unassigned".to_string(),
                    due_date: None,
                    completed: true,
                },
            ],
            participants: vec!["Alice".to_string(), "Bob".to_string()],
            decisions: vec!["Keep budget".to_string()],
            raw_transcript: "Q1 review...".to_string(),
        }
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name(&sample()), "Q1_Review_1-5-2024.json");

        let mut summary = sample();
        summary.title = "Weekly \t Sync".to_string();
        summary.date = "2024-01-05".to_string();
        assert_eq!(export_file_name(&summary), "Weekly_Sync_2024-01-05.json");
    }

    #[test]
    fn test_export_file_name_replaces_path_characters() {
        let mut summary = sample();
        summary.title = "Q1/Q2 Planning".to_string();
        assert_eq!(export_file_name(&summary), "Q1_Q2_Planning_1-5-2024.json");

        summary.title = r#"a\b:c*d?e"f<g>h|i"#.to_string();
        assert_eq!(export_file_name(&summary), "a_b_c_d_e_f_g_h_i_1-5-2024.json");

        summary.title = "tab\u{7}bell".to_string();
        assert_eq!(export_file_name(&summary), "tab_bell_1-5-2024.json");

        summary.title = "..".to_string();
        assert_eq!(export_file_name(&summary), "meeting_1-5-2024.json");
    }

    #[test]
    fn test_write_export_stays_inside_dir() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("a").join("b");

        let mut summary = sample();
        summary.title = "Q1/Q2 Planning".to_string();
        let path = write_export(&summary, &target).unwrap();
        assert_eq!(path.parent(), Some(target.as_path()));
        assert!(path.is_file());

        summary.title = "../../escaped".to_string();
        let path = write_export(&summary, &target).unwrap();
        assert_eq!(path.parent(), Some(target.as_path()));
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some(".._.._escaped_1-5-2024.json")
        );
        assert!(!dir.path().join("escaped_1-5-2024.json").exists());
    }

    #[test]
    fn test_export_json_is_pretty_camel_case() {
        let json = export_json(&sample()).unwrap();
        assert!(json.contains("\n  \"title\": \"Q1 Review\""));
        assert!(json.contains("\"actionItems\""));
        assert!(json.contains("\"rawTranscript\""));

        let back: MeetingSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_write_export_creates_file() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("exports");
        let path = write_export(&sample(), &target).unwrap();

        assert_eq!(path, target.join("Q1_Review_1-5-2024.json"));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, export_json(&sample()).unwrap());
    }

    #[test]
    fn test_email_subject() {
        assert_eq!(
            email_subject(&sample()),
            "Meeting Summary: Q1 Review - 1/5/2024"
        );
    }

    #[test]
    fn test_email_body_layout() {
        let body = email_body(&sample());
        assert!(body.contains("Dear Team,\n\nHere's a summary of our recent meeting:"));
        assert!(body.contains("MEETING: Q1 Review\nDATE: 1/5/2024\nDURATION: 30 min"));
        assert!(body.contains("PARTICIPANTS: Alice, Bob"));
        assert!(body.contains("SUMMARY:\nReviewed the quarter."));
        assert!(body.contains("KEY DECISIONS:\n1. Keep budget"));
        assert!(body.contains(
            "ACTION ITEMS:\n1. Send report - Assigned to: Alice (Due: Friday)\n2. Book room - Assigned to: Unassigned\n"
        ));
        assert!(body.trim_end().ends_with("Best regards,\n[Your Name]"));
    }

    #[test]
    fn test_mailto_url_is_encoded() {
        let url = mailto_url(&sample());
        assert!(url.starts_with("mailto:?subject=Meeting%20Summary%3A%20Q1%20Review%20-%201%2F5%2F2024&body="));
        assert!(!url.contains('\n'));
        assert!(url.contains("Dear%20Team%2C"));
    }
}
