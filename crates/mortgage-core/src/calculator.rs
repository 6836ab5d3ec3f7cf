//! # Calculator Module
//!
//! Amortization and affordability math for the loan program.
//!
//! ## Two Modes, One Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total(P) = P&I(max(P - buydown, 0)) + tax(P) + insurance + hoaFee     │
//! │                                                                         │
//! │  Price mode:    P known        ──► total(P) is the monthly payment     │
//! │                                                                         │
//! │  Payment mode:  payment known  ──► bisect for P with total(P) ≈ target │
//! │                                                                         │
//! │     low = 0                          high = 2 × payment × months        │
//! │      ├────────────────┬────────────────┤                                │
//! │                      mid                                                │
//! │      total(mid) > target ? high = mid : low = mid                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `total(P)` is increasing in `P`, so the search always closes in. Property
//! tax is charged on the full purchase price, not on the financed principal.

use tracing::debug;

use crate::format::format_usd;
use crate::types::{CalcMethod, FormattedResult, RawResult, ValidatedMortgageInput};
use crate::{MAX_RATE_REDUCTION, MAX_SEARCH_ITERATIONS, PAYMENT_TOLERANCE};

// =============================================================================
// Building Blocks
// =============================================================================

/// Monthly principal and interest on a fully amortizing loan.
///
/// ```text
/// r = rate / 100 / 12,  n = term × 12
/// payment = principal × r × (1 + r)^n / ((1 + r)^n − 1)
/// ```
///
/// A zero rate divides by zero and yields NaN. Validated input always has a
/// positive rate, so no special case is made for it.
///
/// ## Example
/// ```rust
/// use mortgage_core::base_monthly_payment;
///
/// let payment = base_monthly_payment(300_000.0, 6.0, 30);
/// assert!((payment - 1798.65).abs() < 0.01);
/// ```
pub fn base_monthly_payment(principal: f64, rate: f64, term_years: u32) -> f64 {
    let monthly_rate = rate / 100.0 / 12.0;
    let months = (term_years * 12) as i32;
    let growth = (1.0 + monthly_rate).powi(months);

    principal * monthly_rate * growth / (growth - 1.0)
}

/// Monthly property tax, rounded to whole dollars.
///
/// `tax_rate` is annual dollars per $1000 of purchase price. Halves round away
/// from zero, so $2.50 becomes $3.
pub fn monthly_tax(purchase_price: f64, tax_rate: f64) -> f64 {
    (purchase_price * (tax_rate / 1000.0) / 12.0).round()
}

/// Everything the borrower pays per month at purchase price `price`.
fn total_monthly_payment(
    price: f64,
    rate: f64,
    term_years: u32,
    tax_rate: f64,
    insurance: f64,
    hoa_fee: f64,
    principal_buydown: f64,
) -> f64 {
    let principal = (price - principal_buydown).max(0.0);
    base_monthly_payment(principal, rate, term_years)
        + monthly_tax(price, tax_rate)
        + insurance
        + hoa_fee
}

// =============================================================================
// Affordability Search
// =============================================================================

/// Finds the purchase price whose total monthly payment matches
/// `desired_payment`.
///
/// Bisects on `[0, 2 × desired_payment × months]` until the payment is within
/// $0.01 of the target or 1000 iterations pass. The last midpoint is returned
/// either way; a target that cannot be met (fees alone exceed it, or the tax
/// rounding step straddles it) still produces the closest price found.
///
/// With a tax rate the result is only monotone in `desired_payment` up to the
/// tolerance: a budget a cent higher can stop on the near side of a tax step
/// and come back a few dollars cheaper.
///
/// A `desired_payment` so large that the bracket overflows returns
/// `f64::INFINITY`.
pub fn max_purchase_price(
    desired_payment: f64,
    rate: f64,
    term_years: u32,
    tax_rate: f64,
    insurance: f64,
    hoa_fee: f64,
    principal_buydown: f64,
) -> f64 {
    let mut low = 0.0;
    let mut high = 2.0 * desired_payment * f64::from(term_years) * 12.0;
    let mut mid = 0.0;
    let mut converged = false;
    let mut iterations = 0;

    while iterations < MAX_SEARCH_ITERATIONS {
        iterations += 1;
        mid = (low + high) / 2.0;

        let total = total_monthly_payment(
            mid,
            rate,
            term_years,
            tax_rate,
            insurance,
            hoa_fee,
            principal_buydown,
        );
        let diff = total - desired_payment;

        if diff.abs() < PAYMENT_TOLERANCE {
            converged = true;
            break;
        }

        if diff > 0.0 {
            high = mid;
        } else {
            low = mid;
        }
    }

    debug!(
        desired_payment,
        price = mid,
        iterations,
        converged,
        "Affordability search finished"
    );
    mid
}

// =============================================================================
// Rate Buydown
// =============================================================================

/// Upfront cost of buying the rate down from `rate` to `desired_rate`.
///
/// ## Points Model
/// - One point costs 1% of the principal.
/// - 15-year loans: 4 points per 1% of rate. Other terms: 6 points per 1%.
/// - At most 1.5 percentage points can be bought; deeper requests are capped.
///
/// Non-finite input, a non-positive principal or term, or a desired rate at
/// or above the current one all cost nothing.
///
/// ## Example
/// ```rust
/// use mortgage_core::interest_rate_buydown;
///
/// // 0.5% off a 30-year loan = 3 points = 3% of principal
/// assert_eq!(interest_rate_buydown(300_000.0, 6.5, 6.0, 30.0), 9_000.0);
/// assert_eq!(interest_rate_buydown(300_000.0, 6.5, 6.5, 30.0), 0.0);
/// ```
pub fn interest_rate_buydown(principal: f64, rate: f64, desired_rate: f64, term: f64) -> f64 {
    let all_finite = [principal, rate, desired_rate, term]
        .iter()
        .all(|v| v.is_finite());
    if !all_finite || principal <= 0.0 || term <= 0.0 {
        return 0.0;
    }

    let effective_rate = desired_rate.max(rate - MAX_RATE_REDUCTION);
    let rate_difference = rate - effective_rate;
    if rate_difference <= 0.0 {
        return 0.0;
    }

    let points_per_percent = if term == 15.0 { 4.0 } else { 6.0 };
    let points_needed = rate_difference * points_per_percent;

    points_needed * principal / 100.0
}

// =============================================================================
// Dual-Mode Calculation
// =============================================================================

/// Computes the monthly breakdown for validated input.
///
/// In payment mode `monthly_payment` echoes the requested payment rather than
/// the sum of the components, which can differ by the search tolerance.
pub fn calculate_raw(input: &ValidatedMortgageInput, mode: CalcMethod) -> RawResult {
    let term_years = input.term.years();

    let (purchase_price, monthly_payment) = match mode {
        CalcMethod::Payment => {
            let price = max_purchase_price(
                input.price,
                input.rate,
                term_years,
                input.tax,
                input.insurance,
                input.hoa_fee,
                input.principal_buydown,
            );
            (price, Some(input.price))
        }
        CalcMethod::Price => (input.price, None),
    };

    let principal = purchase_price - input.principal_buydown;
    let principal_interest = base_monthly_payment(principal.max(0.0), input.rate, term_years);
    let taxes = monthly_tax(purchase_price, input.tax);

    let monthly_payment = monthly_payment
        .unwrap_or(principal_interest + taxes + input.insurance + input.hoa_fee);

    RawResult {
        monthly_payment,
        purchase_price,
        principal_interest,
        taxes,
        insurance: input.insurance,
        hoa_fee: input.hoa_fee,
    }
}

/// Same as [`calculate_raw`], with every figure formatted as dollars.
pub fn calculate(input: &ValidatedMortgageInput, mode: CalcMethod) -> FormattedResult {
    FormattedResult::from(calculate_raw(input, mode))
}

impl From<RawResult> for FormattedResult {
    fn from(raw: RawResult) -> Self {
        FormattedResult {
            monthly_payment: format_usd(raw.monthly_payment),
            purchase_price: format_usd(raw.purchase_price),
            principal_interest: format_usd(raw.principal_interest),
            taxes: format_usd(raw.taxes),
            insurance: format_usd(raw.insurance),
            hoa_fee: format_usd(raw.hoa_fee),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
