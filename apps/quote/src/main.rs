//! # mortgage-quote
//!
//! Command-line caller for mortgage-core.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quote Binary                                     │
//! │                                                                         │
//! │  stdin (raw form JSON) ───► validate ───► calculate ───► stdout JSON   │
//! │                                 │                                       │
//! │                                 └──► { ok: false, errors } exit 2      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod config;
mod error;

use std::io::{self, Read, Write};
use std::process::ExitCode;

use anyhow::Context;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Command;
use crate::config::QuoteConfig;
use crate::error::QuoteError;

/// Exit status when the form fails validation.
const EXIT_INVALID_INPUT: u8 = 2;

fn main() -> ExitCode {
    let config = match QuoteConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", QuoteError::from(e));
            return ExitCode::FAILURE;
        }
    };

    // Logs go to stderr so stdout carries only the JSON result
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    match run(&config) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{e:#}"), "mortgage-quote failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &QuoteConfig) -> anyhow::Result<ExitCode> {
    let command = Command::parse(std::env::args().skip(1))?;

    match command {
        Command::Buydown {
            principal,
            rate,
            desired_rate,
            term,
        } => {
            let cost = cli::buydown(principal, rate, desired_rate, term);
            let response = serde_json::json!({ "ok": true, "data": { "cost": cost } });
            write_json(&response, config.pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Quote { mode } => {
            let mode = mode.unwrap_or(config.mode);
            info!(%mode, "Reading form from stdin");

            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read form from stdin")?;
            let raw = cli::read_form(&input).context("stdin is not a form JSON object")?;

            let response = cli::quote(&raw, mode, config);
            write_json(&response, config.pretty)?;

            if response.ok {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(EXIT_INVALID_INPUT))
            }
        }
    }
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}
