//! Options Sentiment Library
//!
//! Classifies BTC/ETH options-trade chatter from a Telegram channel into
//! strategies, infers sentiment per strategy and aggregates it by traded volume.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod source;
pub mod summarizer;

// Re-export commonly used types
pub use analysis::{analyze_trade, Asset, Sentiment, TradeRecord, TradeType};
pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{build_digest, Digest};
