//! # Validation Module
//!
//! Turns the popup's raw form strings into a [`ValidatedMortgageInput`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Field-by-Field Checks                              │
//! │                                                                         │
//! │  price ──► term ──► rate ──► tax ──► insurance ──► hoaFee ──► buydown  │
//! │    │         │        │       │         │            │           │      │
//! │    └─────────┴────────┴───────┴─────────┴────────────┴───────────┘      │
//! │                              │                                          │
//! │                              ▼                                          │
//! │             every failure appended to ValidationErrors                 │
//! │                                                                         │
//! │  No short-circuit: the form shows all bad fields at once.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mortgage_core::{validate, RawMortgageInput};
//!
//! let raw = RawMortgageInput {
//!     price: Some("300000abc".into()),
//!     term: Some("25".into()),
//!     ..Default::default()
//! };
//!
//! let errors = validate(&raw).unwrap_err();
//! assert_eq!(errors[0].field, "price");
//! assert_eq!(errors[1].field, "term");
//! ```

use tracing::debug;

use crate::error::{FieldProblem, ValidationError, ValidationErrors};
use crate::types::{LoanTerm, RawMortgageInput, ValidatedMortgageInput};

/// Result type for a single field check.
pub type FieldResult<T> = Result<T, FieldProblem>;

/// Which side of zero a numeric field may fall on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    /// Strictly greater than zero.
    Positive,
    /// Zero or more.
    NonNegative,
}

// =============================================================================
// Form Validation
// =============================================================================

/// Validates every field of the form and collects all failures.
///
/// ## Rules
/// - `price`, `rate`: finite and > 0
/// - `term`: a whole number of years in {15, 20, 30}
/// - `tax`, `insurance`, `hoaFee`: finite and >= 0, required
/// - `principalBuydown`: optional (absent → 0), finite and >= 0
pub fn validate(raw: &RawMortgageInput) -> Result<ValidatedMortgageInput, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let price = check(
        &mut errors,
        "price",
        parse_number(raw.price.as_deref(), "Price", Bound::Positive),
    );
    let term = check(&mut errors, "term", parse_term(raw.term.as_deref()));
    let rate = check(
        &mut errors,
        "rate",
        parse_number(raw.rate.as_deref(), "Interest rate", Bound::Positive),
    );
    let tax = check(
        &mut errors,
        "tax",
        parse_number(raw.tax.as_deref(), "Tax rate", Bound::NonNegative),
    );
    let insurance = check(
        &mut errors,
        "insurance",
        parse_number(raw.insurance.as_deref(), "Insurance", Bound::NonNegative),
    );
    let hoa_fee = check(
        &mut errors,
        "hoaFee",
        parse_number(raw.hoa_fee.as_deref(), "HOA fee", Bound::NonNegative),
    );
    let principal_buydown = check(
        &mut errors,
        "principalBuydown",
        parse_optional_number(raw.principal_buydown.as_deref(), "Principal buydown"),
    );

    match (price, term, rate, tax, insurance, hoa_fee, principal_buydown) {
        (
            Some(price),
            Some(term),
            Some(rate),
            Some(tax),
            Some(insurance),
            Some(hoa_fee),
            Some(principal_buydown),
        ) => {
            debug!(term = term.years(), "Mortgage input validated");
            Ok(ValidatedMortgageInput {
                price,
                term,
                rate,
                tax,
                insurance,
                hoa_fee,
                principal_buydown,
            })
        }
        _ => {
            debug!(count = errors.len(), "Mortgage input rejected");
            Err(errors)
        }
    }
}

/// Records a field failure and hands back the value on success.
fn check<T>(errors: &mut ValidationErrors, field: &str, result: FieldResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(problem) => {
            errors.push(ValidationError::new(field, problem));
            None
        }
    }
}

// =============================================================================
// Numeric Parsing
// =============================================================================

/// Parses a strict decimal number.
///
/// Returns `Ok(None)` for missing or whitespace-only text. Trailing garbage
/// ("300000abc") and non-finite spellings ("inf", "NaN") are rejected.
pub fn parse_decimal(text: Option<&str>, label: &'static str) -> FieldResult<Option<f64>> {
    let text = match text.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(text) => text,
    };

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(FieldProblem::NotANumber { label }),
    }
}

fn parse_number(text: Option<&str>, label: &'static str, bound: Bound) -> FieldResult<f64> {
    let value = parse_decimal(text, label)?.ok_or(FieldProblem::Required { label })?;
    check_bound(value, label, bound)
}

fn parse_optional_number(text: Option<&str>, label: &'static str) -> FieldResult<f64> {
    match parse_decimal(text, label)? {
        Some(value) => check_bound(value, label, Bound::NonNegative),
        None => Ok(0.0),
    }
}

fn check_bound(value: f64, label: &'static str, bound: Bound) -> FieldResult<f64> {
    match bound {
        Bound::Positive if value <= 0.0 => Err(FieldProblem::MustBePositive { label }),
        Bound::NonNegative if value < 0.0 => Err(FieldProblem::Negative { label }),
        // -0.0 passes the non-negative check; store it as a plain zero
        _ => Ok(value + 0.0),
    }
}

/// Parses the loan term. Integer-valued text such as "30" or "30.0" is
/// accepted; "30.5" and terms outside {15, 20, 30} are not.
pub fn parse_term(text: Option<&str>) -> FieldResult<LoanTerm> {
    let years = parse_decimal(text, "Loan term")?
        .ok_or(FieldProblem::Required { label: "Loan term" })?;

    if years.fract() != 0.0 || years < 0.0 || years > u32::MAX as f64 {
        return Err(FieldProblem::UnsupportedTerm);
    }

    LoanTerm::from_years(years as u32).ok_or(FieldProblem::UnsupportedTerm)
}

// =============================================================================
// Unit Tests
// =============================================================================
