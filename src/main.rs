//! Meeting Summarizer - meeting transcript assistant CLI
//!
#![doc = "Meeting Summarizer - meeting transcript assistant CLI"]
#![doc = "Main entry point for the meeting summarizer application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use meeting_summarizer::cli::{Cli, Commands};
use meeting_summarizer::commands;
use meeting_summarizer::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat { transcript } => {
            if let Some(path) = &transcript {
                tracing::debug!("Loading transcript from: {}", path.display());
            }
            commands::chat::run_chat(config, transcript).await?;
            Ok(())
        }
        Commands::Summarize { file, text, json } => {
            tracing::info!("Starting one-shot summarization");
            commands::summarize::run_summarize(config, file, text, json).await?;
            Ok(())
        }
        Commands::Archive { command } => {
            commands::archive::handle_archive(config, command)?;
            Ok(())
        }
        Commands::Theme { value } => {
            commands::theme::run_theme(config, value)?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber
///
/// Logs go to stderr so interactive output on stdout stays readable.
/// `RUST_LOG` takes precedence over the default filter.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "meeting_summarizer=debug"
    } else {
        "meeting_summarizer=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
