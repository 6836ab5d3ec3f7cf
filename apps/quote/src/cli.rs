//! Command-line parsing and request handling.
//!
//! ## Commands
//! ```text
//! mortgage-quote [payment|price]          raw form JSON on stdin
//! mortgage-quote buydown P RATE DESIRED T  rate-buydown cost
//! ```

use mortgage_core::{
    calculate_mortgage, interest_rate_buydown, CalcMethod, FormattedResult, RawMortgageInput,
    RawResult, ValidationErrors,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{OutputFormat, QuoteConfig};
use crate::error::QuoteError;

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Validate and calculate a form read from stdin.
    Quote { mode: Option<CalcMethod> },
    /// Price a rate buydown.
    Buydown {
        principal: f64,
        rate: f64,
        desired_rate: f64,
        term: f64,
    },
}

impl Command {
    /// Parses arguments, not including the program name.
    pub fn parse<I, S>(args: I) -> Result<Self, QuoteError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let args: Vec<&str> = args.iter().map(|s| s.as_ref()).collect();

        match args.as_slice() {
            [] => Ok(Command::Quote { mode: None }),
            ["buydown", principal, rate, desired_rate, term] => Ok(Command::Buydown {
                principal: parse_arg("principal", principal)?,
                rate: parse_arg("rate", rate)?,
                desired_rate: parse_arg("desired-rate", desired_rate)?,
                term: parse_arg("term", term)?,
            }),
            ["buydown", ..] => Err(QuoteError::usage()),
            [mode] => mode
                .parse()
                .map(|mode| Command::Quote { mode: Some(mode) })
                .map_err(|_| QuoteError::usage()),
            _ => Err(QuoteError::usage()),
        }
    }
}

fn parse_arg(name: &str, value: &str) -> Result<f64, QuoteError> {
    value
        .trim()
        .parse()
        .map_err(|_| QuoteError::InvalidRequest(format!("{name} must be a number, got {value:?}")))
}

/// Result payload in the configured output format.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QuoteData {
    Raw(RawResult),
    Formatted(FormattedResult),
}

/// The JSON envelope written to stdout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<QuoteData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl QuoteResponse {
    pub fn success(data: QuoteData) -> Self {
        QuoteResponse {
            ok: true,
            data: Some(data),
            errors: None,
        }
    }

    pub fn failure(errors: ValidationErrors) -> Self {
        QuoteResponse {
            ok: false,
            data: None,
            errors: Some(errors),
        }
    }
}

/// Validates and calculates one form.
pub fn quote(raw: &RawMortgageInput, mode: CalcMethod, config: &QuoteConfig) -> QuoteResponse {
    debug!(%mode, "Calculating quote");

    match calculate_mortgage(raw, mode) {
        Ok(result) => {
            info!(
                %mode,
                purchase_price = result.purchase_price,
                monthly_payment = result.monthly_payment,
                "Quote calculated"
            );
            let data = match config.output {
                OutputFormat::Raw => QuoteData::Raw(result),
                OutputFormat::Formatted => QuoteData::Formatted(FormattedResult::from(result)),
            };
            QuoteResponse::success(data)
        }
        Err(errors) => {
            info!(count = errors.len(), "Quote rejected");
            QuoteResponse::failure(errors)
        }
    }
}

/// Reads a form from JSON text.
pub fn read_form(json: &str) -> Result<RawMortgageInput, QuoteError> {
    Ok(serde_json::from_str(json)?)
}

/// Prices a rate buydown.
pub fn buydown(principal: f64, rate: f64, desired_rate: f64, term: f64) -> f64 {
    let cost = interest_rate_buydown(principal, rate, desired_rate, term);
    debug!(principal, rate, desired_rate, term, cost, "Buydown priced");
    cost
}
