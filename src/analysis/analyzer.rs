//! Per-message trade analysis

use serde::Serialize;
use tracing::debug;

use super::classifier::classify;
use super::extract::{detect_asset, extract_volume};
use super::sentiment::Sentiment;
use super::types::{Asset, TradeType};

/// One classified trade message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    /// Source text, kept verbatim for exemplar display
    pub original_message: String,
    pub asset: Asset,
    pub trade_type: TradeType,
    pub sentiment: Sentiment,
    /// One-sentence rationale for the sentiment
    pub summary: &'static str,
    /// `(Nx)` multiplier from the text, 1.0 when absent
    pub volume: f64,
}

/// Analyze one message, `None` when it names no known strategy
pub fn analyze_trade(message: &str) -> Option<TradeRecord> {
    let trade_type = classify(message)?;
    let profile = trade_type.profile();

    Some(TradeRecord {
        original_message: message.to_string(),
        asset: detect_asset(message),
        trade_type,
        sentiment: profile.sentiment,
        summary: profile.summary,
        volume: extract_volume(message),
    })
}

/// Result of analyzing a batch of messages
#[derive(Debug, Clone, Default)]
pub struct AnalysisBatch {
    /// Recognised trades in input order
    pub trades: Vec<TradeRecord>,
    /// Messages with no strategy keyword
    pub skipped: usize,
}

/// Analyze every message, counting the ones that are not trades
pub fn analyze_messages<I, S>(messages: I) -> AnalysisBatch
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut batch = AnalysisBatch::default();

    for message in messages {
        let message = message.as_ref();
        match analyze_trade(message) {
            Some(trade) => {
                debug!(
                    asset = %trade.asset,
                    trade_type = %trade.trade_type,
                    volume = trade.volume,
                    "Classified trade"
                );
                batch.trades.push(trade);
            }
            None => batch.skipped += 1,
        }
    }

    batch
}
