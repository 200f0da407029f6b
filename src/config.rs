//! Configuration loading and validation

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::source::FetchWindow;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
}

/// Telegram channel access
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
    /// Bot token (falls back to TELEGRAM_BOT_TOKEN)
    #[serde(default)]
    pub bot_token: String,
    /// `@username` or numeric chat id (falls back to CHANNEL)
    #[serde(default)]
    pub channel: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: default_telegram_api_base(),
            bot_token: String::new(),
            channel: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Lookback window for message retrieval
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// How far back to look, in hours
    #[serde(default = "default_hours_back")]
    pub hours_back: u64,
    /// Maximum number of channel messages to inspect
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Read from a Telegram Desktop JSON export instead of the Bot API
    #[serde(default)]
    pub export_path: Option<PathBuf>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            hours_back: default_hours_back(),
            limit: default_limit(),
            export_path: None,
        }
    }
}

impl FetchConfig {
    pub fn window(&self) -> FetchWindow {
        FetchWindow {
            limit: self.limit,
            hours_back: self.hours_back,
        }
    }
}

/// Chat-completion summarizer settings
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizerConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_openai_base_url")]
    pub base_url: String,
    /// API key (falls back to OPENAI_API_KEY)
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_summarizer_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_openai_base_url(),
            api_key: String::new(),
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_summarizer_timeout_secs(),
        }
    }
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_hours_back() -> u64 {
    24
}

fn default_limit() -> usize {
    500
}

fn default_true() -> bool {
    true
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_temperature() -> f64 {
    0.4
}

fn default_summarizer_timeout_secs() -> u64 {
    60
}

impl Config {
    /// Load configuration from file and environment variables, applying command-line overrides before validation
    pub fn load_with<P, F>(path: P, overrides: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: FnOnce(&mut Self),
    {
        let mut config = Self::load_layers(path)?;
        config.apply_legacy_env();
        overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then the file (if present), then `SENTIMENT__*` variables
    fn load_layers<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            .set_default("fetch.hours_back", default_hours_back() as i64)?
            .set_default("fetch.limit", default_limit() as i64)?
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("SENTIMENT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        settings
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Fill secrets left empty from the plain variable names used in `.env` files
    fn apply_legacy_env(&mut self) {
        fill_from_env(&mut self.telegram.bot_token, "TELEGRAM_BOT_TOKEN");
        fill_from_env(&mut self.telegram.channel, "CHANNEL");
        fill_from_env(&mut self.summarizer.api_key, "OPENAI_API_KEY");
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.fetch.limit == 0 {
            anyhow::bail!("fetch.limit must be positive");
        }

        if self.fetch.hours_back == 0 {
            anyhow::bail!("fetch.hours_back must be positive");
        }

        if self.fetch.export_path.is_none() && self.telegram.channel.trim().is_empty() {
            anyhow::bail!("telegram.channel (or CHANNEL) is required unless fetch.export_path is set");
        }

        if !(0.0..=2.0).contains(&self.summarizer.temperature) {
            anyhow::bail!(
                "summarizer.temperature must be between 0 and 2, got {}",
                self.summarizer.temperature
            );
        }

        url::Url::parse(&self.telegram.api_base)
            .with_context(|| format!("Invalid telegram.api_base: {}", self.telegram.api_base))?;
        url::Url::parse(&self.summarizer.base_url)
            .with_context(|| format!("Invalid summarizer.base_url: {}", self.summarizer.base_url))?;

        if self.summarizer.enabled && self.summarizer.api_key.is_empty() {
            tracing::warn!("Summarizer enabled without an API key - narratives will show an error placeholder");
        }

        Ok(())
    }

    /// Get masked configuration for display (hide secrets)
    pub fn masked_display(&self) -> String {
        format!(
            r#"Configuration:
  Telegram:
    api_base: {}
    bot_token: {}
    channel: {}
    timeout: {}s
  Fetch:
    hours_back: {}h
    limit: {}
    export_path: {}
  Summarizer:
    enabled: {}
    base_url: {}
    api_key: {}
    model: {}
    temperature: {}
"#,
            self.telegram.api_base,
            mask_secret(&self.telegram.bot_token),
            if self.telegram.channel.is_empty() {
                "(not set)"
            } else {
                self.telegram.channel.as_str()
            },
            self.telegram.timeout_secs,
            self.fetch.hours_back,
            self.fetch.limit,
            self.fetch
                .export_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not set)".to_string()),
            self.summarizer.enabled,
            self.summarizer.base_url,
            mask_secret(&self.summarizer.api_key),
            self.summarizer.model,
            self.summarizer.temperature,
        )
    }
}

fn fill_from_env(value: &mut String, var: &str) {
    if value.is_empty() {
        if let Ok(v) = std::env::var(var) {
            *value = v;
        }
    }
}

/// Mask a secret for display (keep a short prefix)
fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        "(not set)".to_string()
    } else if secret.len() <= 8 {
        "***".to_string()
    } else {
        format!("{}***", secret.chars().take(4).collect::<String>())
    }
}
