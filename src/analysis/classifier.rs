//! Strategy detection by keyword phrase
//!
//! A message is lower-cased and checked for each phrase in
//! [`TRADE_TYPE_PHRASES`] in table order; the first contained phrase wins.
//! Matching is plain substring containment with no word boundaries.

use super::types::TradeType;

/// Ordered phrase table.
///
/// Every multi-word spread/reversal/ratio/calendar phrase must stay ahead of
/// the single-leg phrase it contains ("long call spread" before "long call"),
/// otherwise spreads get reported as single legs.
pub const TRADE_TYPE_PHRASES: [(&str, TradeType); 14] = [
    ("long call spread", TradeType::LongCallSpread),
    ("long put spread", TradeType::LongPutSpread),
    ("short call spread", TradeType::ShortCallSpread),
    ("short put spread", TradeType::ShortPutSpread),
    ("long risk reversal", TradeType::LongRiskReversal),
    ("short risk reversal", TradeType::ShortRiskReversal),
    ("long ratio spread", TradeType::LongRatioSpread),
    ("short ratio spread", TradeType::ShortRatioSpread),
    ("long calendar spread", TradeType::LongCalendarSpread),
    ("short calendar spread", TradeType::ShortCalendarSpread),
    ("long call", TradeType::LongCall),
    ("long put", TradeType::LongPut),
    ("short call", TradeType::ShortCall),
    ("short put", TradeType::ShortPut),
];

/// Classify a message into a strategy, `None` when no phrase matches
pub fn classify(message: &str) -> Option<TradeType> {
    let msg = message.to_lowercase();

    TRADE_TYPE_PHRASES
        .iter()
        .find(|(phrase, _)| msg.contains(phrase))
        .map(|(_, trade_type)| *trade_type)
}
