//! # Currency Formatting
//!
//! Renders calculator output as dollar strings for the popup.
//!
//! ```text
//! 1234.56     ──► "$1,234.56"
//! 1000000     ──► "$1,000,000.00"
//! -42.5       ──► "-$42.50"
//! NaN         ──► ""
//! ```
//!
//! The calculator works in `f64` dollars, so formatting is the only place
//! figures get rounded to cents.

/// Formats `value` as dollars with `decimals` fraction digits and comma
/// thousands separators.
///
/// Returns an empty string for NaN and infinities, so an unfinished form
/// shows a blank field instead of garbage.
///
/// ## Example
/// ```rust
/// use mortgage_core::format_currency;
///
/// assert_eq!(format_currency(1234.56, 2), "$1,234.56");
/// assert_eq!(format_currency(1_000_000.0, 2), "$1,000,000.00");
/// assert_eq!(format_currency(2499.6, 0), "$2,500");
/// assert_eq!(format_currency(f64::NAN, 2), "");
/// ```
pub fn format_currency(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let fixed = round_half_up(value.abs(), decimals);
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    // No "-$0.00" for tiny negatives that round away
    let is_zero = fixed.bytes().all(|b| b == b'0' || b == b'.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 2);
    out.push_str(sign);
    out.push('$');
    out.push_str(&group_thousands(whole));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Two-decimal shorthand for [`format_currency`].
#[inline]
pub fn format_usd(value: f64) -> String {
    format_currency(value, 2)
}

/// Rounds a non-negative finite value to `decimals` places, halves away
/// from zero, and returns the digits.
///
/// Works on the shortest decimal form of the value ("2.675", not the binary
/// 2.67499999...), so a tie the user typed is rounded as a tie, the same way
/// [`crate::monthly_tax`] rounds.
fn round_half_up(value: f64, decimals: usize) -> String {
    // f64 Display never uses exponent notation
    let repr = value.to_string();
    let (whole, fraction) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = whole.bytes().collect();
    let kept = fraction.len().min(decimals);
    digits.extend_from_slice(&fraction.as_bytes()[..kept]);
    digits.resize(whole.len() + decimals, b'0');

    if fraction.as_bytes().get(decimals).is_some_and(|&d| d >= b'5') {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - decimals;
    let mut out = String::from_utf8_lossy(&digits[..split]).into_owned();
    if decimals > 0 {
        out.push('.');
        out.push_str(&String::from_utf8_lossy(&digits[split..]));
    }
    out
}

/// Inserts a comma every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

// =============================================================================
// Unit Tests
// =============================================================================
