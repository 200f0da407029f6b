//! Sentiment inference
//!
//! Each strategy maps to a fixed directional bias and a one-line rationale.
//! The mapping is an exhaustive `match`, so adding a [`TradeType`] variant
//! fails to compile until it is given a profile here.

use serde::{Deserialize, Serialize};

use super::types::TradeType;

/// Directional market bias implied by a strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Bullish,
    Bearish,
    BullishOrNeutral,
    BearishOrNeutral,
    BullishWithCaution,
    BearishWithCaution,
    NeutralToSlightlyBullish,
    NeutralToSlightlyBearish,
    /// Label outside the strategy taxonomy
    Unknown,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "Bullish",
            Sentiment::Bearish => "Bearish",
            Sentiment::BullishOrNeutral => "Bullish or Neutral",
            Sentiment::BearishOrNeutral => "Bearish or Neutral",
            Sentiment::BullishWithCaution => "Bullish with caution",
            Sentiment::BearishWithCaution => "Bearish with caution",
            Sentiment::NeutralToSlightlyBullish => "Neutral to Slightly Bullish",
            Sentiment::NeutralToSlightlyBearish => "Neutral to Slightly Bearish",
            Sentiment::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Sentiment plus the rationale shown alongside it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentimentProfile {
    pub sentiment: Sentiment,
    pub summary: &'static str,
}

impl SentimentProfile {
    pub const UNKNOWN: SentimentProfile = SentimentProfile {
        sentiment: Sentiment::Unknown,
        summary: "Could not determine sentiment.",
    };

    const fn new(sentiment: Sentiment, summary: &'static str) -> Self {
        Self { sentiment, summary }
    }
}

impl TradeType {
    pub fn profile(&self) -> SentimentProfile {
        use Sentiment::*;

        match self {
            TradeType::LongCall => SentimentProfile::new(
                Bullish,
                "Bullish — trader expects significant upside.",
            ),
            TradeType::LongPut => SentimentProfile::new(
                Bearish,
                "Bearish — trader is protecting or speculating on downside.",
            ),
            TradeType::LongCallSpread => SentimentProfile::new(
                Bullish,
                "Moderately bullish — expecting limited upside move.",
            ),
            TradeType::LongPutSpread => SentimentProfile::new(
                Bearish,
                "Moderately bearish — expecting limited downside move.",
            ),
            TradeType::ShortCall => SentimentProfile::new(
                BearishOrNeutral,
                "Bearish or neutral — trader is capping upside or collecting premium.",
            ),
            TradeType::ShortPut => SentimentProfile::new(
                BullishOrNeutral,
                "Bullish or neutral — trader expects price to stay above strike.",
            ),
            TradeType::ShortCallSpread => SentimentProfile::new(
                Bearish,
                "Bearish — trader expects asset to stay below a certain level.",
            ),
            TradeType::ShortPutSpread => SentimentProfile::new(
                Bullish,
                "Bullish — trader expects asset to remain above a lower level.",
            ),
            TradeType::ShortRiskReversal => SentimentProfile::new(
                Bearish,
                "Bearish — selling calls, buying puts — protecting or speculating on downside.",
            ),
            TradeType::LongRiskReversal => SentimentProfile::new(
                Bullish,
                "Bullish — buying calls, selling puts — speculating on upside.",
            ),
            TradeType::LongRatioSpread => SentimentProfile::new(
                BullishWithCaution,
                "Bullish with a hedge — wants upside but expects some cap or volatility.",
            ),
            TradeType::ShortRatioSpread => SentimentProfile::new(
                BearishWithCaution,
                "Bearish with a hedge — selling upside while managing tail risk.",
            ),
            TradeType::LongCalendarSpread => SentimentProfile::new(
                NeutralToSlightlyBullish,
                "Trader expects low near-term volatility but potential longer-term move.",
            ),
            TradeType::ShortCalendarSpread => SentimentProfile::new(
                NeutralToSlightlyBearish,
                "Trader expects near-term volatility and is selling long-dated premium.",
            ),
        }
    }
}

/// Look up the profile for a strategy label, falling back to [`SentimentProfile::UNKNOWN`]
pub fn infer_sentiment(trade_type: &str) -> SentimentProfile {
    trade_type
        .parse::<TradeType>()
        .map(|t| t.profile())
        .unwrap_or(SentimentProfile::UNKNOWN)
}
