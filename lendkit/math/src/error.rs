use {std::any::type_name, thiserror::Error};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("invalid byte length: expecting {expect} bytes, found {actual}")]
    InvalidLength { expect: usize, actual: usize },

    #[error("failed to parse string `{value}` into {ty}: {reason}")]
    ParseNumber {
        ty: &'static str,
        value: String,
        reason: String,
    },

    #[error("non-finite number cannot be represented: {value}")]
    NonFinite { value: String },

    #[error("conversion overflow: {source_type}({value}) does not fit in {target_type}")]
    OverflowConversion {
        source_type: &'static str,
        target_type: &'static str,
        value: String,
    },
}

impl MathError {
    pub fn invalid_length(expect: usize, actual: usize) -> Self {
        Self::InvalidLength { expect, actual }
    }

    pub fn parse_number<T, V, R>(value: V, reason: R) -> Self
    where
        V: ToString,
        R: ToString,
    {
        Self::ParseNumber {
            ty: type_name::<T>(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn non_finite(value: f64) -> Self {
        Self::NonFinite {
            value: value.to_string(),
        }
    }

    pub fn overflow_conversion<S, T>(value: S) -> Self
    where
        S: ToString,
    {
        Self::OverflowConversion {
            source_type: type_name::<S>(),
            target_type: type_name::<T>(),
            value: value.to_string(),
        }
    }

    /// Malformed input. Display paths recover from these by substituting a
    /// placeholder.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidLength { .. } | Self::ParseNumber { .. } | Self::NonFinite { .. }
        )
    }

    /// The value is well-formed but out of range for the wire format. These
    /// must reach the caller.
    pub fn is_overflow(&self) -> bool {
        matches!(self, Self::OverflowConversion { .. })
    }
}

pub type MathResult<T> = core::result::Result<T, MathError>;

// ----------------------------------- tests -----------------------------------
