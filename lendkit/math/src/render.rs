//! String rendering of exact decimals.
//!
//! Everything here works on [`BigDecimal`] digits directly, so no value is
//! ever routed through a binary float on its way to the screen. The output
//! shapes follow the number formatting the operator scripts have always
//! printed: `toFixed`-style fixed places and `toExponential`-style
//! scientific notation (`1.50e-7`, `2.00e+0`).

use {
    bigdecimal::{num_bigint::BigInt, BigDecimal, RoundingMode},
    num_traits::{Signed, Zero},
};

/// Render `value` with exactly `places` fractional digits, rounding half
/// away from zero.
///
/// A negative value that rounds to zero loses its sign: `-0.001` at two
/// places renders as `0.00`.
pub fn to_fixed(value: &BigDecimal, places: u32) -> String {
    let (digits, _) = value
        .with_scale_round(places as i64, RoundingMode::HalfUp)
        .into_bigint_and_exponent();

    let places = places as usize;
    let mut text = format!(
        "{:0>width$}",
        digits.magnitude().to_string(),
        width = places + 1
    );

    if places > 0 {
        text.insert(text.len() - places, '.');
    }

    if digits.is_negative() {
        text.insert(0, '-');
    }

    text
}

/// Render `value` in scientific notation with `fraction_digits` digits after
/// the mantissa's decimal point, rounding half away from zero.
pub fn to_exponential(value: &BigDecimal, fraction_digits: u32) -> String {
    if value.is_zero() {
        return format!("{}e+0", to_fixed(value, fraction_digits));
    }

    let (digits, scale) = value.abs().into_bigint_and_exponent();
    let digit_count = digits.magnitude().to_string().len() as i64;

    let mut exponent = digit_count - 1 - scale;
    let mut mantissa = rounded_mantissa(&digits, scale + exponent, fraction_digits);

    // 9.995e-3 rounds up to 10.00e-3, which must be written as 1.00e-2.
    if mantissa >= BigDecimal::from(10) {
        exponent += 1;
        mantissa = rounded_mantissa(&digits, scale + exponent, fraction_digits);
    }

    format!(
        "{}{}e{}{}",
        if value.is_negative() { "-" } else { "" },
        to_fixed(&mantissa, fraction_digits),
        if exponent < 0 { '-' } else { '+' },
        exponent.abs(),
    )
}

/// Render the exact value with as many fractional digits as it needs and no
/// exponent.
pub fn to_plain(value: &BigDecimal) -> String {
    let normalized = value.normalized();
    let (_, scale) = normalized.as_bigint_and_exponent();

    to_fixed(&normalized, scale.max(0) as u32)
}

/// Divide `value` by `10^places` without any rounding.
pub(crate) fn shift_right(value: &BigDecimal, places: i64) -> BigDecimal {
    let (digits, scale) = value.as_bigint_and_exponent();

    BigDecimal::new(digits, scale + places)
}

fn rounded_mantissa(digits: &BigInt, scale: i64, fraction_digits: u32) -> BigDecimal {
    BigDecimal::new(digits.clone(), scale)
        .with_scale_round(fraction_digits as i64, RoundingMode::HalfUp)
}

// ----------------------------------- tests -----------------------------------
