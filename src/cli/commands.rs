//! CLI command implementations

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use crate::analysis::analyze_trade;
use crate::config::Config;
use crate::pipeline::build_digest;
use crate::source::{fetch_messages, ExportSource, MessageSource, TelegramSource};
use crate::summarizer::OpenAiClient;

/// Fetch the window, classify, aggregate and print the digest
pub async fn report(config: &Config, skip_narratives: bool) -> Result<()> {
    let source = build_source(config)?;
    let window = config.fetch.window();

    let messages = fetch_messages(source.as_ref(), &window, Utc::now())
        .await
        .with_context(|| format!("Failed to fetch messages from {}", source.name()))?;

    let mut digest = build_digest(&messages, window.hours_back);

    if config.summarizer.enabled && !skip_narratives {
        let client = OpenAiClient::new(&config.summarizer);
        info!(
            "Requesting narratives for {} assets from {}",
            digest.assets.len(),
            client.model()
        );
        digest.attach_narratives(&client).await;
    } else {
        warn!("Narrative summaries disabled - printing deterministic reports only");
    }

    print!("{}", digest.render());
    Ok(())
}

/// Classify a single message and print the resulting record
pub fn analyze(message: &str) -> Result<()> {
    match analyze_trade(message) {
        Some(trade) => {
            println!("\n=== TRADE ===\n");
            println!("Message:    {}", trade.original_message);
            println!("Asset:      {}", trade.asset);
            println!("Trade type: {}", trade.trade_type);
            println!("Sentiment:  {}", trade.sentiment);
            println!("Summary:    {}", trade.summary);
            println!("Volume:     {:.1}x", trade.volume);
        }
        None => println!("Not a trade: no strategy keyword matched"),
    }
    Ok(())
}

/// Show current configuration (secrets masked)
pub fn show_config(config: &Config) -> Result<()> {
    println!("{}", config.masked_display());
    Ok(())
}

fn build_source(config: &Config) -> Result<Box<dyn MessageSource>> {
    match &config.fetch.export_path {
        Some(path) => {
            info!("Reading channel history from export {}", path.display());
            Ok(Box::new(ExportSource::new(path)))
        }
        None => {
            let source = TelegramSource::new(&config.telegram)
                .context("Failed to create Telegram source")?;
            Ok(Box::new(source))
        }
    }
}
