//! End-to-end digest: messages in, per-asset reports out

use std::fmt::Write as _;
use tracing::info;

use crate::analysis::{
    analyze_messages, generate_summary, group_by_asset, summarize_sentiment, Asset,
    SentimentAggregate, TradeRecord,
};
use crate::summarizer::{asset_narrative, ChatCompletion};

/// Everything reported for one asset
#[derive(Debug, Clone)]
pub struct AssetSummary {
    pub asset: Asset,
    pub trades: Vec<TradeRecord>,
    pub aggregate: SentimentAggregate,
    /// Deterministic ranked report
    pub report: String,
    /// Model narrative, `None` when the summarizer is disabled
    pub narrative: Option<String>,
}

/// One run over a message window
#[derive(Debug, Clone)]
pub struct Digest {
    pub hours_back: u64,
    /// Messages that named no strategy
    pub skipped: usize,
    /// Assets in first-seen order
    pub assets: Vec<AssetSummary>,
}

/// Classify, group and aggregate; no I/O
pub fn build_digest<I, S>(messages: I, hours_back: u64) -> Digest
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let batch = analyze_messages(messages);
    info!(
        "Analyzed {} trades, skipped {} non-trade messages",
        batch.trades.len(),
        batch.skipped
    );

    let assets = group_by_asset(batch.trades)
        .into_iter()
        .filter(|group| !group.trades.is_empty())
        .map(|group| {
            let aggregate = summarize_sentiment(&group.trades);
            let report = generate_summary(&aggregate);
            AssetSummary {
                asset: group.asset,
                trades: group.trades,
                aggregate,
                report,
                narrative: None,
            }
        })
        .collect();

    Digest {
        hours_back,
        skipped: batch.skipped,
        assets,
    }
}

impl Digest {
    /// Ask the model for a narrative per asset; failures become placeholders
    pub async fn attach_narratives(&mut self, client: &dyn ChatCompletion) {
        for summary in &mut self.assets {
            let narrative =
                asset_narrative(client, summary.asset, &summary.trades, self.hours_back).await;
            summary.narrative = Some(narrative);
        }
    }

    /// Plain-text output for stdout
    pub fn render(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "\n🔍 Sentiment Summary (Last {}h):\n", self.hours_back);
        let _ = writeln!(out, "📭 Skipped {} non-trade messages.", self.skipped);

        for summary in &self.assets {
            let _ = writeln!(out, "\n📊 Asset: {}", summary.asset);
            let _ = writeln!(out, "{}", summary.report);
            if let Some(narrative) = &summary.narrative {
                let _ = writeln!(out, "\n🧠 GPT Sentiment Insight:\n{}", narrative);
            }
        }

        out
    }
}
