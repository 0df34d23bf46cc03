//! Command-line interface definition for the meeting summarizer
//!
//! This module defines the CLI structure using clap's derive API,
//! providing the interactive chat, one-shot summarization, archive
//! management, and theme commands.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Meeting Summarizer - turn meeting transcripts into structured summaries
///
/// Load or paste a transcript, ask for a summary, and keep an archive of
/// every summary with checkable action items.
#[derive(Parser, Debug, Clone)]
#[command(name = "meeting-summarizer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Override the local storage database path
    #[arg(long, env = "MEETING_SUMMARIZER_STORAGE")]
    pub storage_path: Option<String>,

    /// Override the generation model
    #[arg(long)]
    pub model: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the interactive chat session
    Chat {
        /// Transcript file to load before the session starts
        #[arg(short, long)]
        transcript: Option<PathBuf>,
    },

    /// Summarize a transcript once and archive the result
    Summarize {
        /// Transcript file (PDF or plain text)
        #[arg(conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Transcript text given directly on the command line
        #[arg(long)]
        text: Option<String>,

        /// Print the archived summary as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Manage archived summaries
    Archive {
        /// Archive subcommand
        #[command(subcommand)]
        command: ArchiveCommand,
    },

    /// Show or change the color theme
    Theme {
        /// New theme: dark, light, or toggle (omit to show the current one)
        value: Option<String>,
    },
}

/// Archive management subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ArchiveCommand {
    /// List archived summaries
    List,

    /// Show one archived summary
    Show {
        /// Summary ID
        id: i64,
    },

    /// Delete an archived summary
    Delete {
        /// Summary ID
        id: i64,
    },

    /// Flip the completion flag of an action item
    Toggle {
        /// Summary ID
        id: i64,

        /// Action item number within the summary
        item: u32,
    },

    /// Export a summary as a JSON file
    Export {
        /// Summary ID
        id: i64,

        /// Directory to write the file into
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Compose an email for a summary with the default mail handler
    Email {
        /// Summary ID
        id: i64,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            storage_path: None,
            model: None,
            command: Commands::Chat { transcript: None },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default() {
        let cli = Cli::default();
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Commands::Chat { transcript: None }));
    }

    #[test]
    fn test_cli_parse_chat_command() {
        let cli = Cli::try_parse_from(["meeting-summarizer", "chat"]).unwrap();
        assert!(matches!(cli.command, Commands::Chat { .. }));
    }

    #[test]
    fn test_cli_parse_chat_with_transcript() {
        let cli =
            Cli::try_parse_from(["meeting-summarizer", "chat", "--transcript", "notes.pdf"])
                .unwrap();
        if let Commands::Chat { transcript } = cli.command {
            assert_eq!(transcript, Some(PathBuf::from("notes.pdf")));
        } else {
            panic!("Expected Chat command");
        }
    }

    #[test]
    fn test_cli_parse_summarize_text() {
        let cli = Cli::try_parse_from([
            "meeting-summarizer",
            "summarize",
            "--text",
            "Q1 review.",
            "--json",
        ])
        .unwrap();
        if let Commands::Summarize { file, text, json } = cli.command {
            assert!(file.is_none());
            assert_eq!(text, Some("Q1 review.".to_string()));
            assert!(json);
        } else {
            panic!("Expected Summarize command");
        }
    }

    #[test]
    fn test_cli_summarize_file_conflicts_with_text() {
        let cli = Cli::try_parse_from([
            "meeting-summarizer",
            "summarize",
            "notes.txt",
            "--text",
            "hello",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_cli_parse_archive_toggle() {
        let cli =
            Cli::try_parse_from(["meeting-summarizer", "archive", "toggle", "17", "2"]).unwrap();
        if let Commands::Archive {
            command: ArchiveCommand::Toggle { id, item },
        } = cli.command
        {
            assert_eq!(id, 17);
            assert_eq!(item, 2);
        } else {
            panic!("Expected Archive Toggle command");
        }
    }

    #[test]
    fn test_cli_parse_archive_export_default_dir() {
        let cli = Cli::try_parse_from(["meeting-summarizer", "archive", "export", "5"]).unwrap();
        if let Commands::Archive {
            command: ArchiveCommand::Export { id, dir },
        } = cli.command
        {
            assert_eq!(id, 5);
            assert_eq!(dir, PathBuf::from("."));
        } else {
            panic!("Expected Archive Export command");
        }
    }

    #[test]
    fn test_cli_parse_global_overrides() {
        let cli = Cli::try_parse_from([
            "meeting-summarizer",
            "--model",
            "gemini-2.0-flash",
            "--storage-path",
            "/tmp/store.db",
            "theme",
            "light",
        ])
        .unwrap();
        assert_eq!(cli.model.as_deref(), Some("gemini-2.0-flash"));
        assert_eq!(cli.storage_path.as_deref(), Some("/tmp/store.db"));
        if let Commands::Theme { value } = cli.command {
            assert_eq!(value.as_deref(), Some("light"));
        } else {
            panic!("Expected Theme command");
        }
    }

    #[test]
    fn test_cli_invalid_command() {
        assert!(Cli::try_parse_from(["meeting-summarizer", "invalid"]).is_err());
    }
}
