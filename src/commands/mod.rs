/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes four top-level command modules:

- `chat`      - Interactive session
- `summarize` - Summarize one transcript and archive it
- `archive`   - List and act on archived summaries
- `theme`     - Show or change the color theme
*/

use crate::app::App;
use crate::config::Config;
use crate::error::Result;
use crate::providers::create_provider;
use crate::render;
use crate::storage::{LocalStore, SqliteStorage};
use crate::transcript::PdfTextExtractor;
use colored::Colorize;
use std::sync::Arc;

// Archive management commands
pub mod archive;

// Special commands parser for the interactive session
pub mod special_commands;

/// Open local storage at the configured path
///
/// # Errors
///
/// Returns error if the database cannot be created or opened
pub fn open_storage(config: &Config) -> Result<Arc<dyn LocalStore>> {
    let storage = SqliteStorage::open(config.storage.path.as_deref())?;
    tracing::debug!("Using local storage at {}", storage.path().display());
    Ok(Arc::new(storage))
}

/// Build a session from configuration
///
/// # Errors
///
/// Returns error if the provider or storage cannot be initialized
pub fn build_app(config: &Config) -> Result<App> {
    let provider = create_provider(&config.provider)?;
    let store = open_storage(config)?;
    App::new(
        provider,
        Box::new(PdfTextExtractor),
        store,
        config.generation.clone(),
    )
}

fn print_notices(app: &mut App) {
    for notice in app.drain_notices() {
        println!("{}\n", render::render_notice(&notice));
    }
}

/// Text of the summary view for the current summary
fn summary_view_text(app: &App) -> String {
    match app.current_summary() {
        Some(summary) => format!("\n{}\n", render::render_summary(summary, app.theme())),
        None => format!(
            "{}\n",
            "No summary yet. Load a transcript and run /summarize.".yellow()
        ),
    }
}

fn print_current_summary(app: &App) {
    println!("{}", summary_view_text(app));
}

fn print_turns_since(app: &App, from: usize) {
    let theme = app.theme();
    for turn in app.conversation().turns().iter().skip(from) {
        println!("{}\n", render::render_turn(turn, theme));
    }
}

// Interactive session handler
pub mod chat {
    //! Interactive session handler.
    //!
    //! Builds an [`App`], then runs a readline loop that dispatches special
    //! commands and sends everything else as chat messages.

    use super::*;
    use crate::app::View;
    use crate::commands::special_commands::{
        parse_special_command, print_help, SpecialCommand, ThemeChange,
    };
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;
    use std::path::PathBuf;

    /// Start the interactive session
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    /// * `transcript` - Optional transcript file to load first
    pub async fn run_chat(config: Config, transcript: Option<PathBuf>) -> Result<()> {
        tracing::info!("Starting interactive session");

        let mut app = build_app(&config)?;
        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&app);
        print_turns_since(&app, 0);

        if let Some(path) = transcript {
            let before = app.conversation().len();
            app.load_file(&path);
            print_turns_since(&app, before);
            print_notices(&mut app);
        }

        loop {
            let prompt = format!("[{}] >> ", app.view().to_string().cyan());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(trimmed);

                    match parse_special_command(trimmed) {
                        Ok(SpecialCommand::Exit) => break,
                        Ok(SpecialCommand::None) => {
                            let before = app.conversation().len();
                            app.send_message(trimmed).await;
                            print_turns_since(&app, before);
                        }
                        Ok(command) => handle_command(&mut app, &mut rl, command).await,
                        Err(e) => eprintln!("{}\n", e),
                    }
                    print_notices(&mut app);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    async fn handle_command(app: &mut App, rl: &mut DefaultEditor, command: SpecialCommand) {
        let theme = app.theme();
        match command {
            SpecialCommand::Upload(path) => {
                let before = app.conversation().len();
                app.load_file(&path);
                print_turns_since(app, before);
            }
            SpecialCommand::Paste => {
                let text = read_pasted_text(rl);
                let before = app.conversation().len();
                app.paste_transcript(text);
                print_turns_since(app, before);
            }
            SpecialCommand::Summarize => {
                let before = app.conversation().len();
                println!("{}", theme.muted("Generating summary..."));
                let id = app.generate_summary().await;
                print_turns_since(app, before);
                if app.view() == View::Summary {
                    print_current_summary(app);
                }
                if let Some(id) = id {
                    println!(
                        "Summary archived with ID {}. Use {} to view it.\n",
                        id.to_string().cyan(),
                        "/summary".cyan()
                    );
                }
            }
            SpecialCommand::ShowChat => {
                app.switch_view(View::Chat);
                println!("{}\n", render::render_conversation(app.conversation().turns(), theme));
            }
            SpecialCommand::ShowSummary => {
                app.switch_view(View::Summary);
                print_current_summary(app);
            }
            SpecialCommand::ShowArchive => {
                app.switch_view(View::Archive);
                render::print_archive(app.archive().list());
            }
            SpecialCommand::View(id) => {
                if app.select_summary(id) {
                    print_current_summary(app);
                }
            }
            SpecialCommand::Toggle {
                item_id,
                summary_id,
            } => {
                let Some(summary_id) = summary_id.or_else(|| app.current_summary().map(|s| s.id))
                else {
                    println!("{}\n", "No summary selected. Use /view <id> first.".yellow());
                    return;
                };
                if app.toggle_action_item(summary_id, item_id) {
                    match app.archive().get(summary_id).and_then(|s| s.action_item(item_id)) {
                        Some(item) => println!(
                            "{} {}\n",
                            if item.completed { "Completed:" } else { "Reopened:" },
                            item.task
                        ),
                        None => println!(),
                    }
                }
            }
            SpecialCommand::Delete(id) => {
                let Some(id) = id.or_else(|| app.current_summary().map(|s| s.id)) else {
                    println!("{}\n", "No summary selected. Use /delete <id>.".yellow());
                    return;
                };
                app.delete_summary(id);
            }
            SpecialCommand::Export(dir) => {
                let dir = dir.unwrap_or_else(|| PathBuf::from("."));
                app.export_current(&dir);
            }
            SpecialCommand::Email => {
                if let Some(url) = app.email_current() {
                    println!("{}\n{}\n", "Email draft:".bold(), url);
                }
            }
            SpecialCommand::Copy => {
                app.copy_summary();
            }
            SpecialCommand::Theme(change) => {
                match change {
                    ThemeChange::Toggle => app.toggle_theme(),
                    ThemeChange::Set(theme) => app.set_theme(theme),
                }
                println!("Theme: {}\n", app.theme().accent(&app.theme().to_string()));
            }
            SpecialCommand::NewSummary => {
                app.new_summary_flow();
                println!("Ready for a new transcript. Use /upload or /paste.\n");
            }
            SpecialCommand::ClearChat => {
                app.clear_chat();
                print_turns_since(app, 0);
            }
            SpecialCommand::Help => print_help(),
            SpecialCommand::Exit | SpecialCommand::None => {}
        }
    }


    /// Read pasted lines until a line holding only "."
    fn read_pasted_text(rl: &mut DefaultEditor) -> String {
        println!("Paste the transcript. Finish with a line containing only \".\"");
        let mut lines = Vec::new();
        loop {
            match rl.readline("") {
                Ok(line) if line.trim() == "." => break,
                Ok(line) => lines.push(line),
                Err(_) => break,
            }
        }
        lines.join("\n")
    }

    fn print_welcome_banner(app: &App) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║              📝 Meeting Summarizer - Welcome!                ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Model:    {}", app.model_name().cyan());
        println!("Archive:  {} summaries", app.archive().len());
        println!("Theme:    {}\n", app.theme());
        println!("Type '/help' for available commands, 'exit' to quit\n");
    }
}

// One-shot summarization handler
pub mod summarize {
    //! Summarize a single transcript from a file or the command line.

    use super::*;
    use crate::error::SummarizerError;
    use crate::summary::export_json;
    use std::path::PathBuf;

    /// Summarize a transcript, archive the result and print it
    ///
    /// # Errors
    ///
    /// Returns error if no input is given, the transcript cannot be loaded,
    /// or generation fails
    pub async fn run_summarize(
        config: Config,
        file: Option<PathBuf>,
        text: Option<String>,
        json: bool,
    ) -> Result<()> {
        let mut app = build_app(&config)?;

        let loaded = match (file, text) {
            (Some(path), _) => app.load_file(&path),
            (None, Some(text)) => app.paste_transcript(text),
            (None, None) => {
                return Err(SummarizerError::Config(
                    "Provide a transcript file or --text".to_string(),
                )
                .into())
            }
        };
        if !loaded {
            print_notices(&mut app);
            return Err(SummarizerError::NoTranscript.into());
        }

        let Some(id) = app.generate_summary().await else {
            if let Some(turn) = app.conversation().turns().last() {
                eprintln!("{}", turn.content);
            }
            return Err(SummarizerError::Provider("Summary generation failed".to_string()).into());
        };

        let summary = app
            .archive()
            .get(id)
            .cloned()
            .ok_or_else(|| SummarizerError::NotFound(format!("summary {}", id)))?;

        if json {
            println!("{}", export_json(&summary)?);
        } else {
            println!("{}", render::render_summary(&summary, app.theme()));
            println!("\nArchived with ID {}", id);
        }
        print_notices(&mut app);
        Ok(())
    }
}

// Theme command handler
pub mod theme {
    //! Show or change the stored color theme.

    use super::*;
    use crate::error::SummarizerError;
    use crate::theme::Theme;

    /// Show the theme, or set it from `value` ("dark", "light" or "toggle")
    ///
    /// # Errors
    ///
    /// Returns error if `value` is not a theme or storage fails
    pub fn run_theme(config: Config, value: Option<String>) -> Result<()> {
        let store = open_storage(&config)?;
        let current = Theme::load(store.as_ref())?;

        let next = match value.as_deref().map(str::trim) {
            None | Some("show") => {
                println!("{}", current);
                return Ok(());
            }
            Some(v) if v.eq_ignore_ascii_case("toggle") => current.toggled(),
            Some(v) => Theme::parse_str(v).map_err(SummarizerError::Config)?,
        };

        next.save(store.as_ref())?;
        println!("{}", next);
        Ok(())
    }
}
