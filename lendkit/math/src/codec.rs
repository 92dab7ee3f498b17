use {
    crate::{MathError, MathResult},
    bigdecimal::{num_bigint::BigInt, BigDecimal, RoundingMode},
    num_traits::ToPrimitive,
};

/// Number of bytes in an encoded value.
pub const ENCODED_LEN: usize = 16;

/// Number of fractional bits. The encoded integer `raw` stands for
/// `raw / 2^FRACTIONAL_BITS`.
pub const FRACTIONAL_BITS: u32 = 48;

/// `2^FRACTIONAL_BITS`.
pub const DIVISOR: u128 = 1 << FRACTIONAL_BITS;

/// `2^-48 == 5^48 / 10^48`, so any fraction `f / 2^48` is exactly
/// `f * 5^48` with 48 decimal places.
const FIVE_POW_FRACTIONAL_BITS: u128 = 5_u128.pow(FRACTIONAL_BITS);

const FRACTION_MASK: u128 = DIVISOR - 1;

/// Decode 16 little-endian two's-complement bytes into the exact decimal
/// they represent.
///
/// The result carries all 48 fractional bits; nothing is rounded.
pub fn decode(bytes: &[u8]) -> MathResult<BigDecimal> {
    let bytes: [u8; ENCODED_LEN] = bytes
        .try_into()
        .map_err(|_| MathError::invalid_length(ENCODED_LEN, bytes.len()))?;

    Ok(decode_raw(i128::from_le_bytes(bytes)))
}

/// Decode the signed integer behind an encoded value.
pub fn decode_raw(raw: i128) -> BigDecimal {
    // `unsigned_abs` is total, including for `i128::MIN`.
    let magnitude = raw.unsigned_abs();
    let integer_part = magnitude >> FRACTIONAL_BITS;
    let fractional_raw = magnitude & FRACTION_MASK;

    let value = BigDecimal::new(BigInt::from(integer_part), 0)
        + BigDecimal::new(
            BigInt::from(fractional_raw) * BigInt::from(FIVE_POW_FRACTIONAL_BITS),
            FRACTIONAL_BITS as i64,
        );

    if raw < 0 {
        -value
    } else {
        value
    }
}

/// Encode a decimal into 16 little-endian two's-complement bytes.
///
/// The value is scaled by `2^48` and rounded half-to-even onto the nearest
/// representable tick. A target outside the signed 128-bit range is an
/// error; it is never clamped.
pub fn encode(value: &BigDecimal) -> MathResult<[u8; ENCODED_LEN]> {
    encode_raw(value).map(i128::to_le_bytes)
}

/// Same as [`encode`], returning the signed integer instead of its bytes.
pub fn encode_raw(value: &BigDecimal) -> MathResult<i128> {
    let scaled = value * &BigDecimal::new(BigInt::from(DIVISOR), 0);
    let (digits, _) = scaled
        .with_scale_round(0, RoundingMode::HalfEven)
        .into_bigint_and_exponent();

    digits
        .to_i128()
        .ok_or_else(|| MathError::overflow_conversion::<_, i128>(value.clone()))
}

// ----------------------------------- tests -----------------------------------
