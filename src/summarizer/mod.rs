//! Natural-language sentiment narratives from a chat-completion model
//!
//! The prompt lists an asset's trades by descending volume. Failures never
//! propagate: [`asset_narrative`] turns them into a visible placeholder so
//! one asset's failure does not stop the others.

pub mod openai;

use async_trait::async_trait;
use tracing::warn;

use crate::analysis::{Asset, TradeRecord};
use crate::error::Result;

pub use openai::OpenAiClient;

/// Text-generation backend
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Build the narrative prompt for one asset
pub fn build_prompt(asset: Asset, trades: &[TradeRecord], hours_back: u64) -> String {
    let mut ranked: Vec<&TradeRecord> = trades.iter().collect();
    ranked.sort_by(|a, b| b.volume.total_cmp(&a.volume));

    let trade_list = ranked
        .iter()
        .map(|t| format!("- {} ({:?}x)", t.trade_type, t.volume))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\nHere are the most significant trades in {asset} over the past {hours_back} hours:\n\n\
         {trade_list}\n\n\
         Please summarize the overall market sentiment for {asset} based on these trades. \
         Be specific about why, referencing strategies (e.g., call selling, put spread buying) \
         and volumes where relevant.\n"
    )
}

/// Generate the narrative, or `[GPT Error: ...]` if the backend fails
pub async fn asset_narrative(
    client: &dyn ChatCompletion,
    asset: Asset,
    trades: &[TradeRecord],
    hours_back: u64,
) -> String {
    let prompt = build_prompt(asset, trades, hours_back);

    match client.complete(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Narrative summary for {} failed: {}", asset, e);
            format!("[GPT Error: {}]", e)
        }
    }
}
