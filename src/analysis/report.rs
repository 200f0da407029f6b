//! Deterministic text report for one asset

use super::aggregator::SentimentAggregate;

/// Returned when an asset has no sentiment buckets
pub const NO_TRADES_MESSAGE: &str = "No significant trades found.";

/// Render ranked sentiment lines, a blank line, then one exemplar per bucket.
///
/// Ranked lines are ordered by volume; exemplar lines follow bucket order.
pub fn generate_summary(aggregate: &SentimentAggregate) -> String {
    if aggregate.is_empty() {
        return NO_TRADES_MESSAGE.to_string();
    }

    let mut lines: Vec<String> = aggregate
        .ranked()
        .into_iter()
        .map(|(sentiment, volume)| {
            format!(
                "→ {} sentiment dominated with {:.1}x total volume",
                sentiment.label().to_uppercase(),
                volume
            )
        })
        .collect();

    lines.push(String::new());

    lines.extend(aggregate.buckets().iter().filter_map(|bucket| {
        bucket.top_trade().map(|trade| {
            format!(
                "Top {} trade: {}",
                bucket.sentiment.label().to_lowercase(),
                trade.original_message
            )
        })
    }));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregator::summarize_sentiment;
    use crate::analysis::analyzer::{analyze_trade, TradeRecord};

    fn aggregate(messages: &[&str]) -> SentimentAggregate {
        let trades: Vec<TradeRecord> = messages.iter().filter_map(|m| analyze_trade(m)).collect();
        summarize_sentiment(&trades)
    }

    #[test]
    fn test_single_trade_report() {
        let report = generate_summary(&aggregate(&["Opening a Long Call (3x) on BTC"]));
        assert_eq!(
            report,
            "→ BULLISH sentiment dominated with 3.0x total volume\n\
             \n\
             Top bullish trade: Opening a Long Call (3x) on BTC"
        );
    }

    #[test]
    fn test_ranking_and_exemplar_order() {
        let report = generate_summary(&aggregate(&[
            "BTC long put (2x)",
            "BTC long call (5x)",
        ]));

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(
            lines,
            vec![
                "→ BULLISH sentiment dominated with 5.0x total volume",
                "→ BEARISH sentiment dominated with 2.0x total volume",
                "",
                "Top bearish trade: BTC long put (2x)",
                "Top bullish trade: BTC long call (5x)",
            ]
        );
    }

    #[test]
    fn test_compound_sentiment_casing() {
        let report = generate_summary(&aggregate(&["ETH long ratio spread (1.3x)"]));
        assert!(report.starts_with("→ BULLISH WITH CAUTION sentiment dominated with 1.3x total volume"));
        assert!(report.ends_with("Top bullish with caution trade: ETH long ratio spread (1.3x)"));
    }

    #[test]
    fn test_empty_aggregate() {
        assert_eq!(
            generate_summary(&SentimentAggregate::default()),
            "No significant trades found."
        );
    }
}
