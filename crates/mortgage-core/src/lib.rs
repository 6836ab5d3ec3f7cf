//! # mortgage-core: Pure Mortgage Math
//!
//! This crate holds the calculation core used by the rate popup and the quote
//! API. Everything here is a pure function of its inputs.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Mortgage Quote Data Flow                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Popup form / quote API (raw strings)                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ mortgage-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────┐   ┌────────────┐   ┌────────────┐             │   │
//! │  │   │ validation │──►│ calculator │──►│   format   │             │   │
//! │  │   │ raw → typed│   │ price/pmt  │   │  "$1,234"  │             │   │
//! │  │   └────────────┘   └────────────┘   └────────────┘             │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO SHARED STATE                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Input/output records and the calculation mode
//! - [`validation`] - Raw form strings into a [`ValidatedMortgageInput`]
//! - [`calculator`] - Amortization, affordability search, rate buydown
//! - [`format`] - Dollar formatting for display
//! - [`error`] - Validation and core error types
//!
//! ## Example Usage
//!
//! ```rust
//! use mortgage_core::{calculate_mortgage, CalcMethod, RawMortgageInput};
//!
//! let raw = RawMortgageInput {
//!     price: Some("300000".into()),
//!     term: Some("30".into()),
//!     rate: Some("6.125".into()),
//!     tax: Some("15".into()),
//!     insurance: Some("50".into()),
//!     hoa_fee: Some("0".into()),
//!     principal_buydown: None,
//! };
//!
//! let result = calculate_mortgage(&raw, CalcMethod::Price).unwrap();
//! assert_eq!(result.purchase_price, 300000.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod error;
pub mod format;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{
    base_monthly_payment, calculate, calculate_raw, interest_rate_buydown, max_purchase_price,
    monthly_tax,
};
pub use error::{CoreError, ValidationError, ValidationErrors};
pub use format::{format_currency, format_usd};
pub use types::*;
pub use validation::validate;

// =============================================================================
// Caller-Facing Operations
// =============================================================================

/// Validates raw form input and runs the calculation in one step.
///
/// Validation errors are returned unchanged and in field order.
pub fn calculate_mortgage(
    raw: &RawMortgageInput,
    mode: CalcMethod,
) -> Result<RawResult, ValidationErrors> {
    let input = validate(raw)?;
    Ok(calculate_raw(&input, mode))
}

/// Re-derives results from an already validated record.
///
/// Used when a single control (e.g. the rate slider) changes and the rest of
/// the form is known to be valid.
pub fn recalculate_mortgage(input: &ValidatedMortgageInput, mode: CalcMethod) -> RawResult {
    calculate_raw(input, mode)
}

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Loan terms offered by the program, in years.
pub const ALLOWED_TERMS: [u32; 3] = [15, 20, 30];

/// Largest rate reduction that points can buy, in percentage points.
pub const MAX_RATE_REDUCTION: f64 = 1.5;

/// Absolute tolerance, in dollars, for the affordability search.
pub const PAYMENT_TOLERANCE: f64 = 0.01;

/// Iteration cap for the affordability search.
pub const MAX_SEARCH_ITERATIONS: u32 = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_price_form() -> RawMortgageInput {
        RawMortgageInput {
            price: Some("300000".to_string()),
            term: Some("30".to_string()),
            rate: Some("6.125".to_string()),
            tax: Some("15".to_string()),
            insurance: Some("50".to_string()),
            hoa_fee: Some("0".to_string()),
            principal_buydown: None,
        }
    }

    #[test]
    fn test_calculate_mortgage_price_mode() {
        let result = calculate_mortgage(&raw_price_form(), CalcMethod::Price).unwrap();
        assert_eq!(result.purchase_price, 300000.0);
        assert_eq!(
            result.monthly_payment,
            result.principal_interest + result.taxes + result.insurance + result.hoa_fee
        );
    }

    #[test]
    fn test_calculate_mortgage_propagates_errors() {
        let mut raw = raw_price_form();
        raw.price = Some(String::new());
        raw.rate = Some("abc".to_string());

        let errors = calculate_mortgage(&raw, CalcMethod::Price).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["price", "rate"]);
    }

    #[test]
    fn test_recalculate_matches_calculate() {
        let input = validate(&raw_price_form()).unwrap();
        let direct = calculate_mortgage(&raw_price_form(), CalcMethod::Payment).unwrap();
        assert_eq!(recalculate_mortgage(&input, CalcMethod::Payment), direct);
    }
}
