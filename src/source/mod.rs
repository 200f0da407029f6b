//! Message sources - channel history retrieval
//!
//! Supports:
//! - Telegram Bot API (`getUpdates` channel posts)
//! - Telegram Desktop JSON export (`result.json`)
//!
//! Sources only return raw, newest-first messages. The lookback window and
//! ticker pre-filter are applied by [`select_messages`].

pub mod export;
pub mod telegram;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tracing::info;

use crate::analysis::Asset;
use crate::error::Result;

pub use export::ExportSource;
pub use telegram::{ChannelRef, TelegramSource};

/// A channel message as retrieved
#[derive(Debug, Clone, PartialEq)]
pub struct RawMessage {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl RawMessage {
    pub fn new(text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            timestamp,
        }
    }
}

/// Count and age bounds for retrieval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchWindow {
    /// Maximum number of messages inspected, kept or not
    pub limit: usize,
    pub hours_back: u64,
}

impl Default for FetchWindow {
    fn default() -> Self {
        Self {
            limit: 500,
            hours_back: 24,
        }
    }
}

impl FetchWindow {
    /// Oldest timestamp still inside the window
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        i64::try_from(self.hours_back)
            .ok()
            .and_then(TimeDelta::try_hours)
            .and_then(|delta| now.checked_sub_signed(delta))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Source of channel history
#[async_trait]
pub trait MessageSource: Send + Sync {
    /// Human-readable source name for logs
    fn name(&self) -> String;

    /// Up to roughly `limit` messages, newest first
    async fn recent_messages(&self, limit: usize) -> Result<Vec<RawMessage>>;
}

/// True when the text mentions a tracked ticker
pub fn mentions_tracked_asset(text: &str) -> bool {
    let upper = text.to_uppercase();
    Asset::TRACKED.iter().any(|asset| upper.contains(asset.ticker()))
}

/// Apply the window to newest-first messages.
///
/// Inspects at most `limit` messages, skips empty ones, stops at the first
/// message older than the cutoff, and keeps only texts naming BTC or ETH.
pub fn select_messages<I>(messages: I, window: &FetchWindow, now: DateTime<Utc>) -> Vec<String>
where
    I: IntoIterator<Item = RawMessage>,
{
    let cutoff = window.cutoff(now);
    let mut selected = Vec::new();

    for message in messages.into_iter().take(window.limit) {
        if message.text.is_empty() {
            continue;
        }
        if message.timestamp < cutoff {
            break;
        }
        if mentions_tracked_asset(&message.text) {
            selected.push(message.text);
        }
    }

    selected
}

/// Retrieve and window messages from a source
pub async fn fetch_messages(
    source: &dyn MessageSource,
    window: &FetchWindow,
    now: DateTime<Utc>,
) -> Result<Vec<String>> {
    info!(
        "Fetching up to {} messages from the last {}h via {}",
        window.limit,
        window.hours_back,
        source.name()
    );

    let raw = source.recent_messages(window.limit).await?;
    let retrieved = raw.len();
    let selected = select_messages(raw, window, now);

    info!(
        "Retrieved {} messages, {} mention a tracked asset",
        retrieved,
        selected.len()
    );

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn hours_ago(text: &str, hours: i64) -> RawMessage {
        RawMessage::new(text, now() - TimeDelta::hours(hours))
    }

    #[test]
    fn test_cutoff() {
        let window = FetchWindow {
            limit: 10,
            hours_back: 24,
        };
        assert_eq!(window.cutoff(now()), Utc.with_ymd_and_hms(2024, 5, 31, 12, 0, 0).unwrap());

        let huge = FetchWindow {
            limit: 10,
            hours_back: u64::MAX,
        };
        assert_eq!(huge.cutoff(now()), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn test_prefilter_by_ticker() {
        assert!(mentions_tracked_asset("btc long call"));
        assert!(mentions_tracked_asset("Eth short put"));
        assert!(!mentions_tracked_asset("SOL long call"));
    }

    #[test]
    fn test_select_stops_at_cutoff() {
        let messages = vec![
            hours_ago("BTC long call", 1),
            hours_ago("ETH short put", 23),
            hours_ago("BTC long put", 25),
            hours_ago("BTC short call", 2),
        ];
        let selected = select_messages(messages, &FetchWindow::default(), now());
        // the out-of-order message after the cutoff is never reached
        assert_eq!(selected, vec!["BTC long call", "ETH short put"]);
    }

    #[test]
    fn test_select_skips_empty_and_untracked() {
        let messages = vec![
            hours_ago("", 48),
            hours_ago("SOL long call", 1),
            hours_ago("ETH long call", 2),
        ];
        let selected = select_messages(messages, &FetchWindow::default(), now());
        assert_eq!(selected, vec!["ETH long call"]);
    }

    #[test]
    fn test_limit_counts_inspected_messages() {
        let messages = vec![
            hours_ago("gm", 1),
            hours_ago("", 1),
            hours_ago("BTC long call", 1),
            hours_ago("ETH long put", 1),
        ];
        let window = FetchWindow {
            limit: 3,
            hours_back: 24,
        };
        assert_eq!(select_messages(messages, &window, now()), vec!["BTC long call"]);
    }

    struct FixedSource(Vec<RawMessage>);

    #[async_trait]
    impl MessageSource for FixedSource {
        fn name(&self) -> String {
            "fixed".to_string()
        }

        async fn recent_messages(&self, _limit: usize) -> Result<Vec<RawMessage>> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_fetch_messages_applies_window() {
        let source = FixedSource(vec![
            hours_ago("BTC long call (2x)", 1),
            hours_ago("nothing here", 2),
            hours_ago("ETH short put", 30),
        ]);

        let selected = fetch_messages(&source, &FetchWindow::default(), now())
            .await
            .unwrap();
        assert_eq!(selected, vec!["BTC long call (2x)"]);
    }
}
