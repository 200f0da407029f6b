//! Telegram Bot API source
//!
//! Reads channel posts delivered to a bot through `getUpdates`. The bot must
//! be a channel admin, and the Bot API only keeps undelivered updates for a
//! limited time, so this sees recent posts rather than full history.
//! Paging with `offset` acknowledges the updates already read, and the whole
//! pending backlog is read on every call.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::{MessageSource, RawMessage};
use crate::config::TelegramConfig;
use crate::error::{Error, Result};

/// Maximum updates per `getUpdates` call
const UPDATES_PAGE_SIZE: usize = 100;

/// Channel identifier as configured
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelRef {
    Id(i64),
    /// Lower-cased, without `@` or `t.me/` prefix
    Username(String),
}

impl ChannelRef {
    pub fn parse(channel: &str) -> Self {
        let trimmed = channel.trim();
        if let Ok(id) = trimmed.parse::<i64>() {
            return ChannelRef::Id(id);
        }

        let name = trimmed
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_start_matches("t.me/")
            .trim_start_matches('@');
        ChannelRef::Username(name.to_lowercase())
    }

    fn matches(&self, chat: &Chat) -> bool {
        match self {
            ChannelRef::Id(id) => chat.id == *id,
            ChannelRef::Username(name) => chat
                .username
                .as_deref()
                .is_some_and(|u| u.eq_ignore_ascii_case(name)),
        }
    }
}

impl std::fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChannelRef::Id(id) => write!(f, "{}", id),
            ChannelRef::Username(name) => write!(f, "@{}", name),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Update {
    update_id: i64,
    channel_post: Option<ChannelPost>,
    edited_channel_post: Option<ChannelPost>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChannelPost {
    message_id: i64,
    date: i64,
    chat: Chat,
    text: Option<String>,
    caption: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct Chat {
    id: i64,
    username: Option<String>,
}

/// Channel history through the Telegram Bot API
pub struct TelegramSource {
    client: Client,
    api_base: String,
    bot_token: String,
    channel: ChannelRef,
}

impl TelegramSource {
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        if config.bot_token.is_empty() {
            return Err(Error::MissingEnvVar("TELEGRAM_BOT_TOKEN".to_string()));
        }

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            bot_token: config.bot_token.clone(),
            channel: ChannelRef::parse(&config.channel),
        })
    }

    async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>> {
        let url = format!("{}/bot{}/getUpdates", self.api_base, self.bot_token);

        let mut query = vec![
            ("limit", UPDATES_PAGE_SIZE.to_string()),
            (
                "allowed_updates",
                r#"["channel_post","edited_channel_post"]"#.to_string(),
            ),
        ];
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| Error::Telegram(format!("getUpdates request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::Telegram(format!("Failed to read getUpdates response: {}", e)))?;

        // error pages from proxies are not Bot API envelopes
        let body: ApiResponse<Vec<Update>> = serde_json::from_str(&text).map_err(|e| {
            Error::Telegram(format!("getUpdates returned status {}: {}", status, e))
        })?;

        if !status.is_success() || !body.ok {
            return Err(Error::Telegram(
                body.description
                    .unwrap_or_else(|| format!("getUpdates failed with status {}", status)),
            ));
        }

        Ok(body.result.unwrap_or_default())
    }
}

#[async_trait]
impl MessageSource for TelegramSource {
    fn name(&self) -> String {
        format!("Telegram Bot API ({})", self.channel)
    }

    async fn recent_messages(&self, limit: usize) -> Result<Vec<RawMessage>> {
        let mut posts: Vec<ChannelPost> = Vec::new();
        let mut offset = None;

        loop {
            let updates = self.get_updates(offset).await?;
            let page_len = updates.len();
            debug!("getUpdates returned {} updates", page_len);

            for update in updates {
                offset = Some(update.update_id + 1);

                let Some(post) = update.edited_channel_post.or(update.channel_post) else {
                    continue;
                };
                if !self.channel.matches(&post.chat) {
                    continue;
                }

                // an edit replaces the earlier text of the same post
                match posts.iter_mut().find(|p| p.message_id == post.message_id) {
                    Some(existing) => *existing = post,
                    None => posts.push(post),
                }
            }

            // updates arrive oldest-first; drain the backlog before keeping the newest
            if page_len < UPDATES_PAGE_SIZE {
                break;
            }
        }

        let mut messages = into_newest_first(posts);
        messages.truncate(limit);
        Ok(messages)
    }
}

fn into_newest_first(mut posts: Vec<ChannelPost>) -> Vec<RawMessage> {
    posts.sort_by(|a, b| (b.date, b.message_id).cmp(&(a.date, a.message_id)));

    posts
        .into_iter()
        .filter_map(|post| {
            let timestamp = timestamp_from_unix(post.date)?;
            let text = post.text.or(post.caption).unwrap_or_default();
            Some(RawMessage::new(text, timestamp))
        })
        .collect()
}

fn timestamp_from_unix(secs: i64) -> Option<DateTime<Utc>> {
    let timestamp = Utc.timestamp_opt(secs, 0).single();
    if timestamp.is_none() {
        warn!("Dropping post with invalid date {}", secs);
    }
    timestamp
}
