use {
    crate::{
        codec,
        render::{to_exponential, to_fixed},
        MathResult, WrappedI80F48,
    },
    bigdecimal::{num_bigint::BigInt, BigDecimal},
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter, EnumString},
};

/// What a protocol field means, which decides how it is shown.
///
/// The kind never changes the decoded value, only its rendering.
#[derive(
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Default,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ValueKind {
    /// Risk weights: `0.80`.
    Weight,
    /// Interest rates, as percentages: `10.00%`.
    Rate,
    /// Fees, as percentages: `1.00%`.
    Fee,
    /// Share values: `1.000000`.
    Share,
    /// Share balances: `0.500000` below one, `250.00` from one up.
    Balance,
    /// Anything else: `5.00e-3` below a hundredth, `3.14` from there up.
    #[default]
    Default,
}

impl ValueKind {
    /// Render an exact decimal the way this kind of field is shown.
    pub fn format_decimal(self, value: &BigDecimal) -> String {
        match self {
            ValueKind::Weight => to_fixed(value, 2),
            ValueKind::Rate | ValueKind::Fee => {
                let percent = value * &BigDecimal::from(100);
                format!("{}%", to_fixed(&percent, 2))
            },
            ValueKind::Share => to_fixed(value, 6),
            ValueKind::Balance => {
                if value.abs() < BigDecimal::from(1) {
                    to_fixed(value, 6)
                } else {
                    to_fixed(value, 2)
                }
            },
            ValueKind::Default => {
                if value.abs() < one_hundredth() {
                    to_exponential(value, 2)
                } else {
                    to_fixed(value, 2)
                }
            },
        }
    }
}

fn one_hundredth() -> BigDecimal {
    BigDecimal::new(BigInt::from(1), 2)
}

/// Decode a wrapped value and render it according to `kind`.
pub fn format(wrapped: &WrappedI80F48, kind: ValueKind) -> String {
    kind.format_decimal(&wrapped.to_decimal())
}

/// Decode a raw byte slice and render it according to `kind`.
///
/// Decode errors are returned unchanged.
pub fn format_bytes(bytes: &[u8], kind: ValueKind) -> MathResult<String> {
    codec::decode(bytes).map(|value| kind.format_decimal(&value))
}

/// Render a field for a report, substituting [`placeholder`] when the bytes
/// cannot be decoded.
///
/// The substitution is logged so the underlying error is not lost.
pub fn display_or_placeholder(bytes: &[u8], kind: ValueKind) -> String {
    match format_bytes(bytes, kind) {
        Ok(text) => text,
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(err = %_err, %kind, "Failed to render field");

            placeholder(bytes)
        },
    }
}

/// Deterministic stand-in for a field that cannot be rendered: its first
/// three bytes, e.g. `[205,204,204...]`.
pub fn placeholder(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return "[]".to_string();
    }

    let head = bytes
        .iter()
        .take(3)
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",");

    format!("[{head}...]")
}

// ----------------------------------- tests -----------------------------------
