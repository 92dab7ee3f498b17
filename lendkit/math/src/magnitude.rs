use {
    crate::{
        render::{shift_right, to_exponential, to_fixed},
        MathError, MathResult,
    },
    bigdecimal::{num_bigint::BigInt, BigDecimal},
    std::str::FromStr,
};

/// Shown in place of a limit field that holds `u64::MAX`.
pub const UNLIMITED: &str = "Unlimited";

/// Render a token quantity, already in display units, picking notation by
/// magnitude:
///
/// | range                  | output          |
/// |------------------------|-----------------|
/// | `< 0.000001`           | `1.234567e-7`   |
/// | `< 1`                  | `0.000500`      |
/// | `< 1 000`              | `999.00`        |
/// | `< 1 000 000`          | `1.50K`         |
/// | otherwise              | `2.50M`         |
pub fn format_magnitude(value: &BigDecimal) -> String {
    if *value < BigDecimal::new(BigInt::from(1), 6) {
        to_exponential(value, 6)
    } else if *value < BigDecimal::from(1) {
        to_fixed(value, 6)
    } else if *value < BigDecimal::from(1_000) {
        to_fixed(value, 2)
    } else if *value < BigDecimal::from(1_000_000) {
        format!("{}K", to_fixed(&shift_right(value, 3), 2))
    } else {
        format!("{}M", to_fixed(&shift_right(value, 6), 2))
    }
}

/// Render an amount read as native integer units (e.g. off a transfer log),
/// scaling it down by the token's decimals first.
pub fn format_raw_token_amount<T>(native_amount: T, token_decimals: u8) -> String
where
    T: Into<BigInt>,
{
    let scaled = BigDecimal::new(native_amount.into(), token_decimals as i64);

    format_magnitude(&scaled)
}

/// Parse a native amount as printed by RPC dumps, where 64-bit integers are
/// written as decimal strings.
pub fn parse_native_amount(input: &str) -> MathResult<BigInt> {
    BigInt::from_str(input.trim())
        .map_err(|err| MathError::parse_number::<BigInt, _, _>(input, err))
}

/// Render a deposit, borrow, or asset value limit. The program treats
/// `u64::MAX` as "no limit".
pub fn format_limit(limit: u64) -> String {
    if limit == u64::MAX {
        UNLIMITED.to_string()
    } else {
        limit.to_string()
    }
}

// ----------------------------------- tests -----------------------------------
