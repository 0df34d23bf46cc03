//! Terminal rendering
//!
//! Turns conversation turns, summaries and the archive into styled terminal
//! text. Message content uses a small Markdown subset: `## ` and `### `
//! headings and `**bold**` spans.

use crate::app::{Notice, NoticeKind};
use crate::conversation::{ChatTurn, Sender};
use crate::summary::MeetingSummary;
use crate::theme::Theme;
use colored::Colorize;
use prettytable::{format, Table};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("bold pattern is valid"));

fn render_bold(line: &str) -> String {
    BOLD_RE
        .replace_all(line, |caps: &Captures| caps[1].bold().to_string())
        .to_string()
}

/// Render Markdown-like message text for the terminal
pub fn render_markdown(text: &str, theme: Theme) -> String {
    text.lines()
        .map(|line| {
            if let Some(heading) = line.strip_prefix("### ") {
                theme.accent(heading).bold().to_string()
            } else if let Some(heading) = line.strip_prefix("## ") {
                theme.accent(heading).bold().underline().to_string()
            } else {
                render_bold(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one chat turn with its sender label and timestamp
pub fn render_turn(turn: &ChatTurn, theme: Theme) -> String {
    let label = match turn.sender {
        Sender::User => theme.user("You").bold(),
        Sender::Assistant => theme.accent("Assistant").bold(),
    };
    format!(
        "{} {}\n{}",
        label,
        theme.muted(&turn.timestamp),
        render_markdown(&turn.content, theme)
    )
}

/// Render every turn, separated by blank lines
pub fn render_conversation(turns: &[ChatTurn], theme: Theme) -> String {
    turns
        .iter()
        .map(|turn| render_turn(turn, theme))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render the summary view
pub fn render_summary(summary: &MeetingSummary, theme: Theme) -> String {
    let mut out = Vec::new();

    out.push(theme.accent(&summary.title).bold().to_string());
    out.push(
        theme
            .muted(&format!(
                "{} • {} • ID {}",
                summary.date, summary.duration, summary.id
            ))
            .to_string(),
    );
    out.push(String::new());

    out.push("Participants".bold().to_string());
    if summary.participants.is_empty() {
        out.push(theme.muted("None listed").to_string());
    } else {
        out.push(summary.participants.join(", "));
    }
    out.push(String::new());

    out.push("Summary".bold().to_string());
    out.push(summary.summary.clone());
    out.push(String::new());

    out.push("Decisions".bold().to_string());
    if summary.decisions.is_empty() {
        out.push(theme.muted("No decisions recorded").to_string());
    }
    for decision in &summary.decisions {
        out.push(format!("  • {}", decision));
    }
    out.push(String::new());

    out.push(format!(
        "{} ({} of {} complete)",
        "Action Items".bold(),
        summary.completed_count(),
        summary.action_items.len()
    ));
    for item in &summary.action_items {
        let check = if item.completed { "[x]" } else { "[ ]" };
        let task = if item.completed {
            item.task.strikethrough().to_string()
        } else {
            item.task.clone()
        };
        let mut line = format!("  {} {}. {} ({})", check, item.id, task, item.assignee);
        if let Some(due) = &item.due_date {
            line.push_str(&format!(" - Due: {}", due));
        }
        out.push(line);
    }

    out.join("\n")
}

/// Build the archive listing table
pub fn archive_table(summaries: &[MeetingSummary]) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row![
        "ID".bold(),
        "Title".bold(),
        "Details".bold(),
        "Action Items".bold()
    ]);

    for summary in summaries {
        let title = if summary.title.chars().count() > 40 {
            format!("{}...", summary.title.chars().take(37).collect::<String>())
        } else {
            summary.title.clone()
        };
        let details = format!(
            "{} • {} • {} participants",
            summary.date,
            summary.duration,
            summary.participants.len()
        );
        let items = format!(
            "{} ({} done)",
            summary.action_items.len(),
            summary.completed_count()
        );

        table.add_row(prettytable::row![
            summary.id.to_string().cyan(),
            title,
            details,
            items
        ]);
    }

    table
}

/// Print the archive, or a hint when it is empty
pub fn print_archive(summaries: &[MeetingSummary]) {
    if summaries.is_empty() {
        println!("{}", "No archived summaries yet.".yellow());
        return;
    }

    println!("\nArchived Summaries:");
    archive_table(summaries).printstd();
    println!();
    println!("Use {} to open a summary.", "/view <ID>".cyan());
    println!();
}

/// Render a notice as one or two lines
pub fn render_notice(notice: &Notice) -> String {
    let title = match notice.kind {
        NoticeKind::Info => notice.title.yellow(),
        NoticeKind::Success => notice.title.green(),
        NoticeKind::Error => notice.title.red(),
    };
    match &notice.description {
        Some(description) => format!("{}\n  {}", title, description),
        None => title.to_string(),
    }
}
