use {
    crate::magnitude::format_magnitude,
    bigdecimal::{num_bigint::BigInt, BigDecimal, RoundingMode},
    num_traits::Zero,
    std::fmt::{self, Display},
};

/// A token quantity derived from a share count and a share value.
///
/// Both factors come out of the codec already in display units, so the
/// amount is in display units too. The token's decimals only bound the
/// precision it can be settled at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAmount {
    amount: BigDecimal,
    decimals: u8,
}

impl TokenAmount {
    pub fn zero(decimals: u8) -> Self {
        Self {
            amount: BigDecimal::zero(),
            decimals,
        }
    }

    /// The exact product of shares and share value.
    pub fn amount(&self) -> &BigDecimal {
        &self.amount
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// The amount cut down to the token's precision, rounding toward zero.
    pub fn truncated(&self) -> BigDecimal {
        self.amount.with_scale_round(self.decimals as i64, RoundingMode::Down)
    }

    /// The amount in the token's smallest unit, rounding toward zero.
    pub fn to_native_units(&self) -> BigInt {
        let (digits, _) = self.truncated().into_bigint_and_exponent();

        digits
    }
}

impl Display for TokenAmount {
    /// The truncated amount, in magnitude tiers.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_magnitude(&self.truncated()))
    }
}

/// Multiply a share count by a share value.
///
/// `token_decimals` is carried along, not applied: the inputs are already
/// scaled. When either factor is exactly zero the product is zero and no
/// multiplication happens.
pub fn compute_token_amount(
    shares: &BigDecimal,
    share_value: &BigDecimal,
    token_decimals: u8,
) -> TokenAmount {
    if shares.is_zero() || share_value.is_zero() {
        return TokenAmount::zero(token_decimals);
    }

    TokenAmount {
        amount: shares * share_value,
        decimals: token_decimals,
    }
}

/// Render the token amount behind a share balance, e.g. the deposit of a
/// lending account in one bank. The amount is truncated to the token's
/// decimals first; a balance that truncates to zero renders as `0`.
pub fn format_token_balance(
    shares: &BigDecimal,
    share_value: &BigDecimal,
    token_decimals: u8,
) -> String {
    let truncated = compute_token_amount(shares, share_value, token_decimals).truncated();

    if truncated.is_zero() {
        return "0".to_string();
    }

    format_magnitude(&truncated)
}

// ----------------------------------- tests -----------------------------------
