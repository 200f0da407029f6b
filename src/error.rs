//! Error types for the sentiment digest

use thiserror::Error;

/// Result type alias using our custom Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the sentiment digest
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    // Message source errors
    #[error("Telegram API error: {0}")]
    Telegram(String),

    #[error("Export file error: {0}")]
    Export(String),

    // Summarizer errors
    #[error("Summarizer error: {0}")]
    Summarizer(String),

    #[error("Summarizer returned status {status}: {body}")]
    SummarizerStatus { status: u16, body: String },

    // Transport errors
    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("HTTP request timed out")]
    HttpTimeout,

    // Serialization errors
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

// Conversion from reqwest errors
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::HttpTimeout
        } else if e.is_decode() {
            Error::Deserialization(e.to_string())
        } else {
            Error::Http(e.to_string())
        }
    }
}
