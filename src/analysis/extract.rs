//! Attribute extraction: asset ticker and traded volume

use regex::Regex;
use std::sync::OnceLock;

use super::types::Asset;

/// Volume used when a message carries no `(Nx)` multiplier
pub const DEFAULT_VOLUME: f64 = 1.0;

static VOLUME_MULTIPLIER: OnceLock<Regex> = OnceLock::new();

/// `(2.5x)`: digits with at most one decimal point, then a literal `x`, in parentheses
fn volume_multiplier() -> &'static Regex {
    VOLUME_MULTIPLIER.get_or_init(|| {
        Regex::new(r"\(([0-9]+(?:\.[0-9]*)?|\.[0-9]+)x\)").expect("Invalid volume multiplier regex")
    })
}

/// Detect the asset by ticker, BTC taking priority over ETH
pub fn detect_asset(message: &str) -> Asset {
    let msg = message.to_uppercase();

    Asset::TRACKED
        .into_iter()
        .find(|asset| msg.contains(asset.ticker()))
        .unwrap_or(Asset::Unknown)
}

/// Extract the first `(Nx)` multiplier, defaulting to 1.0.
///
/// Only the first occurrence is read; later legs with their own multipliers are ignored.
pub fn extract_volume(message: &str) -> f64 {
    volume_multiplier()
        .captures(message)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(DEFAULT_VOLUME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_asset() {
        assert_eq!(detect_asset("Long Call on BTC"), Asset::Btc);
        assert_eq!(detect_asset("eth short put 3000"), Asset::Eth);
        assert_eq!(detect_asset("SOL long call"), Asset::Unknown);
    }

    #[test]
    fn test_btc_wins_tie_break() {
        assert_eq!(detect_asset("ETH/BTC long call spread"), Asset::Btc);
        assert_eq!(detect_asset("eth then btc"), Asset::Btc);
    }

    #[test]
    fn test_ticker_is_substring_match() {
        // "wbtc" contains "btc"
        assert_eq!(detect_asset("wbtc long put"), Asset::Btc);
        assert_eq!(detect_asset("whether to buy"), Asset::Eth);
    }

    #[test]
    fn test_extract_volume() {
        assert_eq!(extract_volume("BTC Long Call (2.5x) 70k"), 2.5);
        assert_eq!(extract_volume("(3x) ETH short put"), 3.0);
        assert_eq!(extract_volume("(10.x)"), 10.0);
        assert_eq!(extract_volume("(.5x)"), 0.5);
    }

    #[test]
    fn test_extract_volume_default() {
        assert_eq!(extract_volume("BTC Long Call"), DEFAULT_VOLUME);
        assert_eq!(extract_volume("2.5x without brackets"), DEFAULT_VOLUME);
        assert_eq!(extract_volume("(2.5 x)"), DEFAULT_VOLUME);
        assert_eq!(extract_volume("(2.5X)"), DEFAULT_VOLUME);
        assert_eq!(extract_volume("(1.2.3x)"), DEFAULT_VOLUME);
    }

    #[test]
    fn test_explicit_zero_volume_is_kept() {
        assert_eq!(extract_volume("BTC long call (0x)"), 0.0);
        assert_eq!(extract_volume("(0.0x) then (5x)"), 0.0);
    }

    #[test]
    fn test_extract_volume_first_occurrence_only() {
        assert_eq!(extract_volume("leg one (4x), leg two (6x)"), 4.0);
        // a malformed multiplier earlier in the text does not hide a later valid one
        assert_eq!(extract_volume("(1.2.3x) then (5x)"), 5.0);
    }
}
