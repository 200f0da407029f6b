//! Shared types for trade classification
//!
//! Assets and option strategies are closed sets, so they are modelled as
//! enums with their display labels attached.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Asset a trade message refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Asset {
    Btc,
    Eth,
    /// No ticker keyword matched
    Unknown,
}

impl Asset {
    /// Tracked assets in detection priority order
    pub const TRACKED: [Asset; 2] = [Asset::Btc, Asset::Eth];

    /// Ticker keyword scanned for in upper-cased message text
    pub fn ticker(&self) -> &'static str {
        match self {
            Asset::Btc => "BTC",
            Asset::Eth => "ETH",
            Asset::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.ticker())
    }
}

/// Options strategy named in a trade message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeType {
    LongCall,
    LongPut,
    ShortCall,
    ShortPut,
    LongCallSpread,
    LongPutSpread,
    ShortCallSpread,
    ShortPutSpread,
    LongRiskReversal,
    ShortRiskReversal,
    LongRatioSpread,
    ShortRatioSpread,
    LongCalendarSpread,
    ShortCalendarSpread,
}

impl TradeType {
    pub const ALL: [TradeType; 14] = [
        TradeType::LongCall,
        TradeType::LongPut,
        TradeType::ShortCall,
        TradeType::ShortPut,
        TradeType::LongCallSpread,
        TradeType::LongPutSpread,
        TradeType::ShortCallSpread,
        TradeType::ShortPutSpread,
        TradeType::LongRiskReversal,
        TradeType::ShortRiskReversal,
        TradeType::LongRatioSpread,
        TradeType::ShortRatioSpread,
        TradeType::LongCalendarSpread,
        TradeType::ShortCalendarSpread,
    ];

    /// Human-readable strategy name
    pub fn label(&self) -> &'static str {
        match self {
            TradeType::LongCall => "Long Call",
            TradeType::LongPut => "Long Put",
            TradeType::ShortCall => "Short Call",
            TradeType::ShortPut => "Short Put",
            TradeType::LongCallSpread => "Long Call Spread",
            TradeType::LongPutSpread => "Long Put Spread",
            TradeType::ShortCallSpread => "Short Call Spread",
            TradeType::ShortPutSpread => "Short Put Spread",
            TradeType::LongRiskReversal => "Long Risk Reversal",
            TradeType::ShortRiskReversal => "Short Risk Reversal",
            TradeType::LongRatioSpread => "Long Ratio Spread",
            TradeType::ShortRatioSpread => "Short Ratio Spread",
            TradeType::LongCalendarSpread => "Long Calendar Spread",
            TradeType::ShortCalendarSpread => "Short Calendar Spread",
        }
    }
}

impl std::fmt::Display for TradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parses the human-readable label ("Long Call Spread")
impl FromStr for TradeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TradeType::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| format!("unknown trade type: {}", s))
    }
}
