//! Special commands parser for the interactive session
//!
//! Special commands drive the session instead of being sent as chat
//! messages: loading transcripts, summarizing, switching views, and acting
//! on the current summary.
//!
//! Commands are prefixed with `/` and are case-insensitive. Arguments keep
//! their original case so file paths survive.

use crate::theme::Theme;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing special commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/help' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/help' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// How `/theme` changes the theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeChange {
    /// Switch to the other theme
    Toggle,
    /// Use this theme
    Set(Theme),
}

/// Special commands that can be executed during the interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialCommand {
    /// Load a transcript file
    Upload(PathBuf),

    /// Read a pasted transcript from the following lines
    Paste,

    /// Summarize the loaded transcript
    Summarize,

    /// Show the conversation
    ShowChat,

    /// Show the current summary
    ShowSummary,

    /// Show the archive
    ShowArchive,

    /// Open an archived summary
    View(i64),

    /// Flip an action item, in the given summary or the current one
    Toggle {
        item_id: u32,
        summary_id: Option<i64>,
    },

    /// Delete a summary, the current one when no ID is given
    Delete(Option<i64>),

    /// Export the current summary as JSON
    Export(Option<PathBuf>),

    /// Draft an email for the current summary
    Email,

    /// Copy the current summary text
    Copy,

    /// Change the theme
    Theme(ThemeChange),

    /// Drop the current summary and transcript and return to chat
    NewSummary,

    /// Reset the conversation
    ClearChat,

    /// Display help information
    Help,

    /// Exit the interactive session
    Exit,

    /// Not a special command; send as a chat message
    None,
}

fn parse_id<T: std::str::FromStr>(command: &str, arg: &str) -> Result<T, CommandError> {
    arg.parse::<T>()
        .map_err(|_| CommandError::UnsupportedArgument {
            command: command.to_string(),
            arg: arg.to_string(),
        })
}

fn optional_arg(rest: &str) -> Option<&str> {
    if rest.is_empty() {
        None
    } else {
        Some(rest)
    }
}

/// Parse a user input string into a special command
///
/// # Errors
///
/// Returns [`CommandError::UnknownCommand`] for an unrecognized `/` command,
/// [`CommandError::MissingArgument`] when a required argument is absent and
/// [`CommandError::UnsupportedArgument`] when an argument does not parse.
///
/// # Examples
///
/// ```
/// use meeting_summarizer::commands::special_commands::{parse_special_command, SpecialCommand};
///
/// assert_eq!(parse_special_command("/SUMMARIZE").unwrap(), SpecialCommand::Summarize);
/// assert_eq!(parse_special_command("/view 42").unwrap(), SpecialCommand::View(42));
/// assert_eq!(parse_special_command("what was decided?").unwrap(), SpecialCommand::None);
/// assert!(parse_special_command("/foo").is_err());
/// ```
pub fn parse_special_command(input: &str) -> Result<SpecialCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if lower == "exit" || lower == "quit" {
        return Ok(SpecialCommand::Exit);
    }
    if !trimmed.starts_with('/') {
        return Ok(SpecialCommand::None);
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    match command.as_str() {
        "/upload" | "/load" => match optional_arg(rest) {
            Some(path) => Ok(SpecialCommand::Upload(PathBuf::from(path))),
            None => Err(CommandError::MissingArgument {
                command: "/upload".to_string(),
                usage: "/upload <path>".to_string(),
            }),
        },
        "/paste" => Ok(SpecialCommand::Paste),
        "/summarize" | "/summarise" => Ok(SpecialCommand::Summarize),
        "/chat" => Ok(SpecialCommand::ShowChat),
        "/summary" => Ok(SpecialCommand::ShowSummary),
        "/archive" | "/history" => Ok(SpecialCommand::ShowArchive),
        "/view" | "/open" => match optional_arg(rest) {
            Some(arg) => Ok(SpecialCommand::View(parse_id("/view", arg)?)),
            None => Err(CommandError::MissingArgument {
                command: "/view".to_string(),
                usage: "/view <summary-id>".to_string(),
            }),
        },
        "/toggle" | "/done" => {
            let mut args = rest.split_whitespace();
            let item_id = match args.next() {
                Some(arg) => parse_id::<u32>("/toggle", arg)?,
                None => {
                    return Err(CommandError::MissingArgument {
                        command: "/toggle".to_string(),
                        usage: "/toggle <item-number> [summary-id]".to_string(),
                    })
                }
            };
            let summary_id = args
                .next()
                .map(|arg| parse_id::<i64>("/toggle", arg))
                .transpose()?;
            if let Some(extra) = args.next() {
                return Err(CommandError::UnsupportedArgument {
                    command: "/toggle".to_string(),
                    arg: extra.to_string(),
                });
            }
            Ok(SpecialCommand::Toggle {
                item_id,
                summary_id,
            })
        }
        "/delete" => Ok(SpecialCommand::Delete(
            optional_arg(rest)
                .map(|arg| parse_id::<i64>("/delete", arg))
                .transpose()?,
        )),
        "/export" => Ok(SpecialCommand::Export(optional_arg(rest).map(PathBuf::from))),
        "/email" => Ok(SpecialCommand::Email),
        "/copy" => Ok(SpecialCommand::Copy),
        "/theme" => match optional_arg(rest) {
            None => Ok(SpecialCommand::Theme(ThemeChange::Toggle)),
            Some(arg) if arg.eq_ignore_ascii_case("toggle") => {
                Ok(SpecialCommand::Theme(ThemeChange::Toggle))
            }
            Some(arg) => Theme::parse_str(arg)
                .map(|theme| SpecialCommand::Theme(ThemeChange::Set(theme)))
                .map_err(|_| CommandError::UnsupportedArgument {
                    command: "/theme".to_string(),
                    arg: arg.to_string(),
                }),
        },
        "/new" => Ok(SpecialCommand::NewSummary),
        "/clear" => Ok(SpecialCommand::ClearChat),
        "/help" | "/?" => Ok(SpecialCommand::Help),
        "/exit" | "/quit" => Ok(SpecialCommand::Exit),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print help for the interactive session
pub fn print_help() {
    println!(
        r#"
Commands for the Interactive Session
====================================

TRANSCRIPTS:
  /upload <path>   - Load a transcript (PDF or plain text)
  /paste           - Paste a transcript; finish with a line containing only "."

SUMMARIES:
  /summarize       - Summarize the loaded transcript
  /toggle <n> [id] - Mark action item n complete/incomplete
  /export [dir]    - Save the current summary as JSON (default: current dir)
  /email           - Open an email draft of the current summary
  /copy            - Copy the current summary text to the clipboard
  /delete [id]     - Delete a summary (default: the current one)
  /new             - Start a new summary (clears transcript and summary)

VIEWS:
  /chat            - Show the conversation
  /summary         - Show the current summary
  /archive         - List archived summaries
  /view <id>       - Open an archived summary

SESSION:
  /theme [dark|light] - Set or toggle the color theme
  /clear           - Clear the conversation and the loaded transcript
  /help            - Show this help message
  exit             - Exit the session
  quit             - Same as exit

NOTES:
  - Commands are case-insensitive
  - Any other text is sent as a question about the loaded transcript
"#
    );
}
