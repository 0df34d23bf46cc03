use crate::archive::ArchiveStore;
use crate::cli::ArchiveCommand;
use crate::commands::open_storage;
use crate::config::Config;
use crate::error::{Result, SummarizerError};
use crate::render;
use crate::summary::{mailto_url, open_email_draft, write_export};
use crate::theme::Theme;
use colored::Colorize;

/// Handle archive commands
pub fn handle_archive(config: Config, command: ArchiveCommand) -> Result<()> {
    let store = open_storage(&config)?;
    let mut archive = ArchiveStore::load(store.clone())?;

    match command {
        ArchiveCommand::List => {
            render::print_archive(archive.list());
        }
        ArchiveCommand::Show { id } => {
            let summary = archive
                .get(id)
                .ok_or_else(|| SummarizerError::NotFound(format!("summary {}", id)))?;
            let theme = Theme::load(store.as_ref())?;
            println!("{}", render::render_summary(summary, theme));
        }
        ArchiveCommand::Delete { id } => {
            archive.remove(id)?;
            println!("{}", format!("Deleted summary {}", id).green());
        }
        ArchiveCommand::Toggle { id, item } => {
            let updated = archive.toggle_action_item(id, item)?;
            if let Some(action) = updated.action_item(item) {
                let state = if action.completed {
                    "complete"
                } else {
                    "not complete"
                };
                println!("Action item {} ({}) marked {}", item, action.task, state);
            }
            println!(
                "{} of {} complete",
                updated.completed_count(),
                updated.action_items.len()
            );
        }
        ArchiveCommand::Export { id, dir } => {
            let summary = archive
                .get(id)
                .ok_or_else(|| SummarizerError::NotFound(format!("summary {}", id)))?;
            let path = write_export(summary, &dir)?;
            println!("{}", format!("Exported to {}", path.display()).green());
        }
        ArchiveCommand::Email { id } => {
            let summary = archive
                .get(id)
                .ok_or_else(|| SummarizerError::NotFound(format!("summary {}", id)))?;
            match open_email_draft(summary) {
                Ok(url) => println!("{}", url),
                Err(e) => {
                    tracing::warn!("{:#}", e);
                    println!(
                        "{}\n{}",
                        "No mail handler available; open this link manually:".yellow(),
                        mailto_url(summary)
                    );
                }
            }
        }
    }

    Ok(())
}
