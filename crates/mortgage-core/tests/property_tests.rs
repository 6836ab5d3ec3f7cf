//! Property-based tests using proptest.
//!
//! These check the calculator's invariants across random loans instead of
//! fixed examples.

use mortgage_core::{
    base_monthly_payment, calculate_mortgage, calculate_raw, interest_rate_buydown,
    max_purchase_price, recalculate_mortgage, CalcMethod, LoanTerm, RawMortgageInput,
    ValidatedMortgageInput, PAYMENT_TOLERANCE,
};
use proptest::prelude::*;

fn any_term() -> impl Strategy<Value = LoanTerm> {
    prop_oneof![
        Just(LoanTerm::Fifteen),
        Just(LoanTerm::Twenty),
        Just(LoanTerm::Thirty),
    ]
}

// --- Affordability round trip ---

proptest! {
    /// Without property tax the payment curve is continuous, so the price
    /// found in payment mode must reproduce the target payment in price mode.
    #[test]
    fn payment_mode_round_trips_without_tax(
        desired in 500.0_f64..10_000.0,
        rate in 2.0_f64..12.0,
        term in any_term(),
        insurance in 0.0_f64..200.0,
        hoa_fee in 0.0_f64..200.0,
        principal_buydown in 0.0_f64..50_000.0,
    ) {
        let input = ValidatedMortgageInput {
            price: desired,
            term,
            rate,
            tax: 0.0,
            insurance,
            hoa_fee,
            principal_buydown,
        };

        let affordable = calculate_raw(&input, CalcMethod::Payment);
        prop_assert_eq!(affordable.monthly_payment, desired);

        let priced = ValidatedMortgageInput { price: affordable.purchase_price, ..input };
        let check = recalculate_mortgage(&priced, CalcMethod::Price);

        prop_assert!(
            (check.monthly_payment - desired).abs() < PAYMENT_TOLERANCE,
            "desired {} but price {} costs {}",
            desired,
            affordable.purchase_price,
            check.monthly_payment
        );
    }
}

proptest! {
    /// With tax the monthly tax moves in whole-dollar steps, so the best the
    /// search can do is land within one step of the target.
    #[test]
    fn payment_mode_round_trips_with_tax(
        desired in 1_000.0_f64..8_000.0,
        rate in 3.0_f64..9.0,
        term in any_term(),
        tax in 5.0_f64..25.0,
    ) {
        let input = ValidatedMortgageInput {
            price: desired,
            term,
            rate,
            tax,
            insurance: 75.0,
            hoa_fee: 0.0,
            principal_buydown: 0.0,
        };

        let affordable = calculate_raw(&input, CalcMethod::Payment);
        let priced = ValidatedMortgageInput { price: affordable.purchase_price, ..input };
        let check = calculate_raw(&priced, CalcMethod::Price);

        prop_assert!((check.monthly_payment - desired).abs() <= 1.0 + PAYMENT_TOLERANCE);
    }
}

// --- Monotonicity ---

proptest! {
    /// A bigger budget never buys a cheaper house.
    #[test]
    fn max_purchase_price_increases_with_payment(
        desired in 500.0_f64..8_000.0,
        extra in 1.0_f64..2_000.0,
        rate in 2.0_f64..12.0,
        term in any_term(),
    ) {
        let years = term.years();
        let lower = max_purchase_price(desired, rate, years, 0.0, 50.0, 0.0, 0.0);
        let higher = max_purchase_price(desired + extra, rate, years, 0.0, 50.0, 0.0, 0.0);

        prop_assert!(
            higher > lower,
            "{} -> {}, {} -> {}",
            desired,
            lower,
            desired + extra,
            higher
        );
    }
}

proptest! {
    /// With tax the search stops anywhere inside the $0.01 window, and the
    /// window can sit on either side of a tax step. A slightly bigger budget
    /// may then land a little lower, but never by more than the price that
    /// two tolerances of principal and interest buy.
    #[test]
    fn max_purchase_price_with_tax_drops_at_most_two_tolerances(
        desired in 1_000.0_f64..5_000.0,
        extra in 0.0_f64..0.05,
        rate in 3.0_f64..9.0,
        term in any_term(),
        tax in 5.0_f64..25.0,
    ) {
        let years = term.years();
        let lower = max_purchase_price(desired, rate, years, tax, 50.0, 0.0, 0.0);
        let higher = max_purchase_price(desired + extra, rate, years, tax, 50.0, 0.0, 0.0);

        // Principal and interest are linear in the principal
        let per_dollar = base_monthly_payment(1.0, rate, years);
        let max_drop = 2.0 * PAYMENT_TOLERANCE / per_dollar + 0.01;

        prop_assert!(
            higher >= lower - max_drop,
            "{} -> {}, {} -> {}, allowed drop {}",
            desired,
            lower,
            desired + extra,
            higher,
            max_drop
        );
    }
}

// --- Price mode ---

proptest! {
    /// Price mode echoes the price and sums the components exactly.
    #[test]
    fn price_mode_sums_components(
        price in 50_000.0_f64..2_000_000.0,
        rate in 1.0_f64..12.0,
        term in any_term(),
        tax in 0.0_f64..30.0,
        insurance in 0.0_f64..300.0,
        hoa_fee in 0.0_f64..500.0,
    ) {
        let input = ValidatedMortgageInput {
            price,
            term,
            rate,
            tax,
            insurance,
            hoa_fee,
            principal_buydown: 0.0,
        };

        let result = calculate_raw(&input, CalcMethod::Price);
        prop_assert_eq!(result.purchase_price, price);
        prop_assert_eq!(
            result.monthly_payment,
            result.principal_interest + result.taxes + result.insurance + result.hoa_fee
        );
        prop_assert_eq!(result.taxes.fract(), 0.0);
    }
}

// --- Rate buydown ---

proptest! {
    /// Equal rates cost nothing, whatever the loan.
    #[test]
    fn buydown_to_same_rate_is_free(
        principal in -100_000.0_f64..2_000_000.0,
        rate in 0.0_f64..15.0,
        term in prop_oneof![Just(15.0_f64), Just(20.0), Just(30.0)],
    ) {
        prop_assert_eq!(interest_rate_buydown(principal, rate, rate, term), 0.0);
    }
}

proptest! {
    /// Cost never exceeds the 1.5-point cap and is deterministic.
    #[test]
    fn buydown_is_bounded_and_deterministic(
        principal in 1.0_f64..2_000_000.0,
        rate in 2.0_f64..12.0,
        reduction in 0.0_f64..5.0,
        term in prop_oneof![Just(15.0_f64), Just(20.0), Just(30.0)],
    ) {
        let cost = interest_rate_buydown(principal, rate, rate - reduction, term);
        let again = interest_rate_buydown(principal, rate, rate - reduction, term);
        let points_per_percent = if term == 15.0 { 4.0 } else { 6.0 };

        prop_assert_eq!(cost, again);
        prop_assert!(cost >= 0.0);
        prop_assert!(cost <= 1.5 * points_per_percent * principal / 100.0 + 1e-6);
    }
}

// --- Fixed scenarios ---

#[test]
fn price_mode_scenario_from_popup() {
    let raw = RawMortgageInput {
        price: Some("300000".to_string()),
        term: Some("30".to_string()),
        rate: Some("6.125".to_string()),
        tax: Some("15".to_string()),
        insurance: Some("50".to_string()),
        hoa_fee: Some("0".to_string()),
        principal_buydown: Some("0".to_string()),
    };

    let result = calculate_mortgage(&raw, CalcMethod::Price).unwrap();
    assert_eq!(result.purchase_price, 300000.0);
    assert_eq!(
        result.monthly_payment,
        result.principal_interest + result.taxes + result.insurance + result.hoa_fee
    );
}

#[test]
fn buydown_half_point_on_thirty_year() {
    let cost = interest_rate_buydown(300000.0, 6.5, 6.0, 30.0);
    assert!(cost > 0.0);
    assert_eq!(cost, interest_rate_buydown(300000.0, 6.5, 6.0, 30.0));
}

#[test]
fn invalid_form_reports_every_field() {
    let raw = RawMortgageInput {
        price: Some("".to_string()),
        term: Some("25".to_string()),
        rate: Some("6.0".to_string()),
        tax: Some("x".to_string()),
        insurance: Some("50".to_string()),
        hoa_fee: Some("0".to_string()),
        principal_buydown: None,
    };

    let errors = calculate_mortgage(&raw, CalcMethod::Payment).unwrap_err();
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["price", "term", "tax"]);
}
