use {
    crate::{codec, render::to_plain, MathError, MathResult},
    bigdecimal::BigDecimal,
    borsh::{BorshDeserialize, BorshSerialize},
    num_traits::FromPrimitive,
    serde::{Deserialize, Serialize},
    std::{
        fmt::{self, Display},
        str::FromStr,
    },
};

/// Largest integer a double represents exactly, `2^53 - 1`.
pub const MAX_SAFE_INTEGER: u128 = (1 << 53) - 1;

/// A signed fixed-point number with 80 integer bits and 48 fractional bits,
/// in the byte layout account fields use on-chain.
///
/// Serializes as `{ "value": [..16 bytes..] }` in JSON and as the raw 16
/// bytes in Borsh.
#[derive(
    BorshSerialize,
    BorshDeserialize,
    Serialize,
    Deserialize,
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
)]
pub struct WrappedI80F48 {
    pub value: [u8; codec::ENCODED_LEN],
}

impl WrappedI80F48 {
    pub const ONE: Self = Self::from_raw(1 << codec::FRACTIONAL_BITS);
    pub const ZERO: Self = Self::from_raw(0);

    pub const fn from_raw(raw: i128) -> Self {
        Self {
            value: raw.to_le_bytes(),
        }
    }

    /// Wrap a byte slice cut out of a larger account layout.
    pub fn from_bytes(bytes: &[u8]) -> MathResult<Self> {
        let value = bytes
            .try_into()
            .map_err(|_| MathError::invalid_length(codec::ENCODED_LEN, bytes.len()))?;

        Ok(Self { value })
    }

    /// Encode a decimal, rounding half-to-even onto the nearest tick.
    pub fn from_decimal(value: &BigDecimal) -> MathResult<Self> {
        codec::encode(value).map(|value| Self { value })
    }

    /// Encode a float. NaN and infinities are rejected.
    pub fn from_f64(value: f64) -> MathResult<Self> {
        if !value.is_finite() {
            return Err(MathError::non_finite(value));
        }

        // Finite doubles always convert.
        let decimal = BigDecimal::from_f64(value).ok_or_else(|| MathError::non_finite(value))?;

        Self::from_decimal(&decimal)
    }

    pub const fn raw(&self) -> i128 {
        i128::from_le_bytes(self.value)
    }

    pub fn is_zero(&self) -> bool {
        self.raw() == 0
    }

    /// The exact decimal value. This is the value to do arithmetic with.
    pub fn to_decimal(&self) -> BigDecimal {
        codec::decode_raw(self.raw())
    }

    /// Narrow to a double for display.
    ///
    /// The float is the correctly rounded value of `raw / 2^48`. When the
    /// integer part exceeds [`MAX_SAFE_INTEGER`] the result carries a
    /// [`PrecisionWarning`]: the float is then only an approximation and
    /// must not feed further arithmetic.
    pub fn to_f64(&self) -> Narrowed {
        let raw = self.raw();
        let integer_part = raw.unsigned_abs() >> codec::FRACTIONAL_BITS;

        Narrowed {
            value: raw as f64 / codec::DIVISOR as f64,
            warning: (integer_part > MAX_SAFE_INTEGER).then_some(PrecisionWarning { integer_part }),
        }
    }
}

impl From<[u8; codec::ENCODED_LEN]> for WrappedI80F48 {
    fn from(value: [u8; codec::ENCODED_LEN]) -> Self {
        Self { value }
    }
}

impl TryFrom<&[u8]> for WrappedI80F48 {
    type Error = MathError;

    fn try_from(bytes: &[u8]) -> MathResult<Self> {
        Self::from_bytes(bytes)
    }
}

impl FromStr for WrappedI80F48 {
    type Err = MathError;

    /// Parse a decimal string such as `"0.8"`, `"-1.25"` or `"4e-2"`, then
    /// encode it.
    fn from_str(input: &str) -> MathResult<Self> {
        let decimal = BigDecimal::from_str(input.trim())
            .map_err(|err| MathError::parse_number::<Self, _, _>(input, err))?;

        Self::from_decimal(&decimal)
    }
}

impl Display for WrappedI80F48 {
    /// The exact decimal, with every significant fractional digit.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_plain(&self.to_decimal()))
    }
}

// --------------------------------- narrowing ---------------------------------

/// A double produced from an exact value, with a note on whether it lost
/// integer precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Narrowed {
    pub value: f64,
    pub warning: Option<PrecisionWarning>,
}

impl Narrowed {
    pub fn is_exact_integer_part(&self) -> bool {
        self.warning.is_none()
    }
}

/// The integer part of a narrowed value does not survive conversion to a
/// double.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrecisionWarning {
    pub integer_part: u128,
}

impl Display for PrecisionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "integer part {} exceeds {MAX_SAFE_INTEGER}; the narrowed value is approximate",
            self.integer_part
        )
    }
}

// ----------------------------------- tests -----------------------------------
