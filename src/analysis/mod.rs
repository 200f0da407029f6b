//! Trade classification and sentiment aggregation
//!
//! Rule-based pipeline over raw message text:
//! - `classifier` - strategy detection by ordered keyword phrases
//! - `extract` - asset ticker and `(Nx)` volume
//! - `sentiment` - fixed strategy to sentiment table
//! - `analyzer` - builds a [`TradeRecord`] per message
//! - `aggregator` - per-asset, per-sentiment volume buckets
//! - `report` - ranked text summary

pub mod aggregator;
pub mod analyzer;
pub mod classifier;
pub mod extract;
pub mod report;
pub mod sentiment;
pub mod types;

pub use aggregator::{group_by_asset, summarize_sentiment, AssetTrades, SentimentAggregate, SentimentBucket};
pub use analyzer::{analyze_messages, analyze_trade, AnalysisBatch, TradeRecord};
pub use classifier::{classify, TRADE_TYPE_PHRASES};
pub use extract::{detect_asset, extract_volume, DEFAULT_VOLUME};
pub use report::{generate_summary, NO_TRADES_MESSAGE};
pub use sentiment::{infer_sentiment, Sentiment, SentimentProfile};
pub use types::{Asset, TradeType};
