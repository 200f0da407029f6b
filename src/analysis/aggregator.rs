//! Volume-weighted sentiment aggregation
//!
//! Trades are partitioned by asset, then bucketed by sentiment. Buckets keep
//! first-seen order; only the report's ranked section reorders them.

use std::cmp::Ordering;

use super::analyzer::TradeRecord;
use super::sentiment::Sentiment;
use super::types::Asset;

/// Trades for a single asset, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct AssetTrades {
    pub asset: Asset,
    pub trades: Vec<TradeRecord>,
}

/// Partition trades by asset, keeping the order in which assets first appear.
///
/// Every returned group is non-empty.
pub fn group_by_asset<I>(trades: I) -> Vec<AssetTrades>
where
    I: IntoIterator<Item = TradeRecord>,
{
    let mut groups: Vec<AssetTrades> = Vec::new();

    for trade in trades {
        match groups.iter_mut().find(|g| g.asset == trade.asset) {
            Some(group) => group.trades.push(trade),
            None => groups.push(AssetTrades {
                asset: trade.asset,
                trades: vec![trade],
            }),
        }
    }

    groups
}

/// All trades sharing one sentiment
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentBucket {
    pub sentiment: Sentiment,
    pub total_volume: f64,
    pub trades: Vec<TradeRecord>,
}

impl SentimentBucket {
    /// Highest-volume trade; the earliest one wins a tie
    pub fn top_trade(&self) -> Option<&TradeRecord> {
        self.trades.iter().fold(None, |best: Option<&TradeRecord>, trade| match best {
            Some(b) if b.volume >= trade.volume => Some(b),
            _ => Some(trade),
        })
    }
}

/// Per-asset sentiment totals and exemplars
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SentimentAggregate {
    buckets: Vec<SentimentBucket>,
}

impl SentimentAggregate {
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets in first-seen order
    pub fn buckets(&self) -> &[SentimentBucket] {
        &self.buckets
    }

    /// Total volume per sentiment, first-seen order
    pub fn volume_by_sentiment(&self) -> Vec<(Sentiment, f64)> {
        self.buckets
            .iter()
            .map(|b| (b.sentiment, b.total_volume))
            .collect()
    }

    /// Total volume per sentiment, highest first; equal volumes keep first-seen order
    pub fn ranked(&self) -> Vec<(Sentiment, f64)> {
        let mut ranked = self.volume_by_sentiment();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked
    }
}

/// Sum volume and collect trades per sentiment
pub fn summarize_sentiment(trades: &[TradeRecord]) -> SentimentAggregate {
    let mut aggregate = SentimentAggregate::default();

    for trade in trades {
        match aggregate
            .buckets
            .iter_mut()
            .find(|b| b.sentiment == trade.sentiment)
        {
            Some(bucket) => {
                bucket.total_volume += trade.volume;
                bucket.trades.push(trade.clone());
            }
            None => aggregate.buckets.push(SentimentBucket {
                sentiment: trade.sentiment,
                total_volume: trade.volume,
                trades: vec![trade.clone()],
            }),
        }
    }

    aggregate
}
