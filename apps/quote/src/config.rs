//! Quote binary configuration module.
//!
//! Configuration is loaded from `MORTGAGE_*` environment variables, then an
//! optional `mortgage-quote.toml` in the working directory, with fallback to
//! defaults. Environment variables win over the file.

use config::{Config, Environment, File};
use mortgage_core::CalcMethod;
use serde::Deserialize;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain numbers, e.g. `1822.8316187420728`.
    Raw,
    /// Dollar strings, e.g. `"$1,822.83"`.
    Formatted,
}

/// Settings exactly as read from the environment or file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSettings {
    pub mode: String,
    pub output: String,
    pub log: String,
    pub pretty: bool,
}

/// Quote binary configuration.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// Calculation mode used when none is given on the command line
    pub mode: CalcMethod,

    /// Raw numbers or formatted dollar strings
    pub output: OutputFormat,

    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl QuoteConfig {
    /// Load configuration from the environment and optional config file.
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("mode", "price")?
            .set_default("output", "formatted")?
            .set_default("log", "info")?
            .set_default("pretty", true)?
            .add_source(File::with_name("mortgage-quote").required(false))
            .add_source(Environment::with_prefix("MORTGAGE").try_parsing(true))
            .build()?;

        Self::from_settings(settings.try_deserialize()?)
    }

    /// Check raw settings and convert them to typed configuration.
    pub fn from_settings(raw: RawSettings) -> Result<Self, ConfigError> {
        let mode = raw
            .mode
            .parse()
            .map_err(|_| ConfigError::InvalidValue("MORTGAGE_MODE".to_string()))?;

        let output = match raw.output.trim().to_ascii_lowercase().as_str() {
            "raw" => OutputFormat::Raw,
            "formatted" => OutputFormat::Formatted,
            _ => return Err(ConfigError::InvalidValue("MORTGAGE_OUTPUT".to_string())),
        };

        if raw.log.trim().is_empty() {
            return Err(ConfigError::InvalidValue("MORTGAGE_LOG".to_string()));
        }

        Ok(QuoteConfig {
            mode,
            output,
            log_filter: raw.log,
            pretty: raw.pretty,
        })
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}
