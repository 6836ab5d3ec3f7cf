//! Error types for the quote binary.

use crate::config::ConfigError;

/// Quote binary errors.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Usage: {0}")]
    Usage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QuoteError {
    pub fn usage() -> Self {
        QuoteError::Usage(
            "mortgage-quote [payment|price] < form.json\n       \
             mortgage-quote buydown <principal> <rate> <desired-rate> <term>"
                .to_string(),
        )
    }
}
