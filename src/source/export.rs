//! Telegram Desktop export source
//!
//! Reads the `result.json` produced by "Export chat history" in Telegram
//! Desktop (JSON format). Message text is either a plain string or an array
//! mixing strings and formatted entities; both are flattened to plain text.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::{MessageSource, RawMessage};
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct ExportFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    messages: Vec<ExportMessage>,
}

#[derive(Debug, Deserialize)]
struct ExportMessage {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    date_unixtime: Option<String>,
    #[serde(default)]
    text: ExportText,
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
enum ExportText {
    Plain(String),
    Rich(Vec<TextPart>),
    #[default]
    Empty,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextPart {
    Plain(String),
    Entity { text: String },
}

impl ExportText {
    fn flatten(self) -> String {
        match self {
            ExportText::Plain(text) => text,
            ExportText::Rich(parts) => parts
                .into_iter()
                .map(|part| match part {
                    TextPart::Plain(text) | TextPart::Entity { text } => text,
                })
                .collect(),
            ExportText::Empty => String::new(),
        }
    }
}

impl ExportMessage {
    fn timestamp(&self) -> Option<DateTime<Utc>> {
        if let Some(secs) = self
            .date_unixtime
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
        {
            return Utc.timestamp_opt(secs, 0).single();
        }

        // older exports only carry local ISO time; read it as UTC
        self.date
            .as_deref()
            .and_then(|s| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").ok())
            .map(|naive| naive.and_utc())
    }
}

/// Channel history from an exported `result.json`
pub struct ExportSource {
    path: PathBuf,
}

impl ExportSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse export JSON into newest-first messages
    fn parse(content: &str) -> Result<(Option<String>, Vec<RawMessage>)> {
        let export: ExportFile = serde_json::from_str(content)
            .map_err(|e| Error::Export(format!("Failed to parse export: {}", e)))?;

        let mut messages: Vec<RawMessage> = Vec::with_capacity(export.messages.len());
        for message in export.messages {
            if message.kind != "message" {
                continue;
            }
            let Some(timestamp) = message.timestamp() else {
                debug!("Skipping exported message without a readable date");
                continue;
            };
            messages.push(RawMessage::new(message.text.flatten(), timestamp));
        }

        // exports are oldest-first
        messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok((export.name, messages))
    }
}

#[async_trait]
impl MessageSource for ExportSource {
    fn name(&self) -> String {
        format!("export file {}", self.path.display())
    }

    async fn recent_messages(&self, limit: usize) -> Result<Vec<RawMessage>> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::Export(format!("Failed to read {}: {}", self.path.display(), e)))?;

        let (channel, mut messages) = Self::parse(&content)?;
        info!(
            "Loaded {} messages from export of {}",
            messages.len(),
            channel.as_deref().unwrap_or("(unnamed chat)")
        );

        messages.truncate(limit);
        Ok(messages)
    }
}
