//! # Error Types
//!
//! Error types for mortgage-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  FieldProblem      - why one field failed (renders the message)        │
//! │  ValidationError   - { field, message } handed to the caller           │
//! │  ValidationErrors  - every failing field, in check order               │
//! │  CoreError         - a calculation mode the core does not know         │
//! │                                                                         │
//! │  Flow: FieldProblem → ValidationError → ValidationErrors → caller      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculator itself never errors; degenerate numbers are clamped.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Field Problem
// =============================================================================

/// The reason a single form field was rejected.
///
/// `label` is the human name of the field ("Interest rate"), not its key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldProblem {
    /// Field is missing, empty, or whitespace only.
    #[error("{label} is required")]
    Required { label: &'static str },

    /// Field text is not a finite number.
    #[error("{label} must be a valid number")]
    NotANumber { label: &'static str },

    /// Value must be strictly greater than zero.
    #[error("{label} must be greater than 0")]
    MustBePositive { label: &'static str },

    /// Value must be zero or more.
    #[error("{label} cannot be negative")]
    Negative { label: &'static str },

    /// Loan term is not one the program offers.
    #[error("Loan term must be 15, 20, or 30 years")]
    UnsupportedTerm,
}

// =============================================================================
// Validation Error
// =============================================================================

/// One rejected field, tagged with the form key it came from.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Form key, e.g. `"price"` or `"hoaFee"`.
    pub field: String,
    /// Message suitable for showing next to the field.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, problem: FieldProblem) -> Self {
        ValidationError {
            field: field.to_string(),
            message: problem.to_string(),
        }
    }
}

/// Every failing field from one validation pass.
///
/// Order matches the order fields are checked in, never empty when returned
/// as an error.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        ValidationErrors(Vec::new())
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }
}

impl Deref for ValidationErrors {
    type Target = [ValidationError];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while parsing caller-supplied options.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Calculation mode string is neither "payment" nor "price".
    #[error("Unknown calculation method: {0}")]
    UnknownCalcMethod(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
