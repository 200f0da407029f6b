//! Options Sentiment - volume-weighted sentiment digest of options-trade messages

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

use options_sentiment::cli::commands;
use options_sentiment::config::Config;

/// Options-flow sentiment digest
#[derive(Parser)]
#[command(name = "sentiment")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch recent channel messages and print the sentiment digest
    Report {
        /// Lookback window in hours
        #[arg(long)]
        hours: Option<u64>,

        /// Maximum number of channel messages to inspect
        #[arg(long)]
        limit: Option<usize>,

        /// Read a Telegram Desktop JSON export instead of the Bot API
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,

        /// Skip the model-generated narratives
        #[arg(long)]
        no_gpt: bool,
    },

    /// Classify a single message
    Analyze {
        /// Message text
        message: String,
    },

    /// Show current configuration (secrets masked)
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("options_sentiment=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Report {
            hours,
            limit,
            export,
            no_gpt,
        } => {
            let config = load_config(&cli.config, |config| {
                if let Some(hours) = hours {
                    config.fetch.hours_back = hours;
                }
                if let Some(limit) = limit {
                    config.fetch.limit = limit;
                }
                if export.is_some() {
                    config.fetch.export_path = export;
                }
            });
            commands::report(&config, no_gpt).await
        }
        Commands::Analyze { message } => commands::analyze(&message),
        Commands::Config => {
            let config = load_config(&cli.config, |_| {});
            commands::show_config(&config)
        }
    };

    if let Err(e) = result {
        error!("Command failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn load_config<F: FnOnce(&mut Config)>(path: &str, overrides: F) -> Config {
    match Config::load_with(path, overrides) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    }
}
