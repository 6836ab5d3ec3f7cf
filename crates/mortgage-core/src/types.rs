//! # Domain Types
//!
//! Records that flow through the core.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────────┐   ┌────────────────┐  │
//! │  │ RawMortgageInput │──►│ValidatedMortgageInput│──►│   RawResult    │  │
//! │  │  ──────────────  │   │  ──────────────────  │   │  ────────────  │  │
//! │  │  strings from    │   │  finite f64 fields   │   │  f64 figures   │  │
//! │  │  the popup form  │   │  term: LoanTerm      │   │  per month     │  │
//! │  └──────────────────┘   └──────────────────────┘   └───────┬────────┘  │
//! │                                                            │           │
//! │  ┌──────────────────┐                              ┌───────▼────────┐  │
//! │  │   CalcMethod     │                              │FormattedResult │  │
//! │  │  Payment | Price │                              │  "$1,234.56"   │  │
//! │  └──────────────────┘                              └────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names serialize in camelCase to match the popup's form keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::ALLOWED_TERMS;

// =============================================================================
// Calculation Mode
// =============================================================================

/// Selects how the `price` field of the input is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CalcMethod {
    /// `price` is the desired monthly payment; solve for purchase price.
    Payment,
    /// `price` is the purchase price; compute the monthly payment.
    Price,
}

impl CalcMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CalcMethod::Payment => "payment",
            CalcMethod::Price => "price",
        }
    }
}

impl Default for CalcMethod {
    fn default() -> Self {
        CalcMethod::Price
    }
}

impl fmt::Display for CalcMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalcMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "payment" => Ok(CalcMethod::Payment),
            "price" => Ok(CalcMethod::Price),
            _ => Err(CoreError::UnknownCalcMethod(s.to_string())),
        }
    }
}

// =============================================================================
// Loan Term
// =============================================================================

/// A loan term the program offers. Serializes as the number of years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
pub enum LoanTerm {
    Fifteen,
    Twenty,
    Thirty,
}

impl LoanTerm {
    /// Returns the term for a number of years, if the program offers it.
    pub fn from_years(years: u32) -> Option<Self> {
        match years {
            15 => Some(LoanTerm::Fifteen),
            20 => Some(LoanTerm::Twenty),
            30 => Some(LoanTerm::Thirty),
            _ => None,
        }
    }

    #[inline]
    pub const fn years(&self) -> u32 {
        match self {
            LoanTerm::Fifteen => 15,
            LoanTerm::Twenty => 20,
            LoanTerm::Thirty => 30,
        }
    }
}

impl From<LoanTerm> for u32 {
    fn from(term: LoanTerm) -> Self {
        term.years()
    }
}

impl TryFrom<u32> for LoanTerm {
    type Error = String;

    fn try_from(years: u32) -> Result<Self, Self::Error> {
        LoanTerm::from_years(years)
            .ok_or_else(|| format!("loan term must be one of {ALLOWED_TERMS:?}, got {years}"))
    }
}

// =============================================================================
// Raw Input
// =============================================================================

/// Form values exactly as the popup or API caller supplied them.
///
/// `None` and whitespace-only strings are both treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RawMortgageInput {
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub rate: Option<String>,
    #[serde(default)]
    pub tax: Option<String>,
    #[serde(default)]
    pub insurance: Option<String>,
    #[serde(default)]
    pub hoa_fee: Option<String>,
    #[serde(default)]
    pub principal_buydown: Option<String>,
}

// =============================================================================
// Validated Input
// =============================================================================

/// The only record the calculator accepts. Every number is finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedMortgageInput {
    /// Desired monthly payment (payment mode) or purchase price (price mode).
    pub price: f64,
    #[ts(type = "15 | 20 | 30")]
    pub term: LoanTerm,
    /// Annual interest rate in percent, e.g. `6.125`.
    pub rate: f64,
    /// Annual property tax per $1000 of purchase price.
    pub tax: f64,
    /// Monthly homeowner's insurance.
    pub insurance: f64,
    /// Monthly HOA dues.
    pub hoa_fee: f64,
    /// Lump sum taken off the financed principal.
    #[serde(default)]
    pub principal_buydown: f64,
}

// =============================================================================
// Results
// =============================================================================

/// Monthly figures as plain numbers. Formatting is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RawResult {
    pub monthly_payment: f64,
    pub purchase_price: f64,
    pub principal_interest: f64,
    pub taxes: f64,
    pub insurance: f64,
    pub hoa_fee: f64,
}

/// [`RawResult`] rendered for display, e.g. `"$1,234.56"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FormattedResult {
    pub monthly_payment: String,
    pub purchase_price: String,
    pub principal_interest: String,
    pub taxes: String,
    pub insurance: String,
    pub hoa_fee: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_method_from_str() {
        assert_eq!("payment".parse::<CalcMethod>().unwrap(), CalcMethod::Payment);
        assert_eq!(" Price ".parse::<CalcMethod>().unwrap(), CalcMethod::Price);
        assert!(matches!(
            "rent".parse::<CalcMethod>(),
            Err(CoreError::UnknownCalcMethod(s)) if s == "rent"
        ));
    }

    #[test]
    fn test_calc_method_default() {
        assert_eq!(CalcMethod::default(), CalcMethod::Price);
    }

    #[test]
    fn test_loan_term_from_years() {
        assert_eq!(LoanTerm::from_years(15), Some(LoanTerm::Fifteen));
        assert_eq!(LoanTerm::from_years(30).map(|t| t.years()), Some(30));
        assert_eq!(LoanTerm::from_years(25), None);
    }

    #[test]
    fn test_validated_input_serializes_camel_case() {
        let input = ValidatedMortgageInput {
            price: 2500.0,
            term: LoanTerm::Twenty,
            rate: 6.5,
            tax: 12.0,
            insurance: 80.0,
            hoa_fee: 25.0,
            principal_buydown: 0.0,
        };

        let json = serde_json::to_value(input).unwrap();
        assert_eq!(json["term"], 20);
        assert_eq!(json["hoaFee"], 25.0);
        assert_eq!(json["principalBuydown"], 0.0);

        let back: ValidatedMortgageInput = serde_json::from_value(json).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn test_loan_term_rejects_unknown_years() {
        let result: Result<LoanTerm, _> = serde_json::from_str("25");
        assert!(result.is_err());
    }

    #[test]
    fn test_raw_input_missing_fields_default_to_none() {
        let raw: RawMortgageInput = serde_json::from_str(r#"{"price": "1800"}"#).unwrap();
        assert_eq!(raw.price.as_deref(), Some("1800"));
        assert!(raw.hoa_fee.is_none());
        assert!(raw.principal_buydown.is_none());
    }
}
