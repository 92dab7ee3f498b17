//! Exact arithmetic and display for the wrapped `I80F48` fixed-point values
//! stored in lending-protocol accounts.
//!
//! - [`codec`] converts between the 16-byte wire layout and exact decimals.
//! - [`interpret`] renders a decoded value according to the kind of field it
//!   came from.
//! - [`magnitude`] and [`balance`] turn share balances and native amounts
//!   into token quantities for operators.
//! - [`report`] renders whole bank and balance dumps.

pub mod balance;
pub mod codec;
mod error;
pub mod interpret;
pub mod magnitude;
pub mod render;
pub mod report;
mod wrapped;

pub use {
    balance::{compute_token_amount, format_token_balance, TokenAmount},
    error::*,
    interpret::{display_or_placeholder, format, format_bytes, placeholder, ValueKind},
    magnitude::{format_limit, format_magnitude, format_raw_token_amount, parse_native_amount},
    report::{
        BalanceSnapshot, BankConfigSnapshot, BankSnapshot, InterestRateSnapshot, RawWrapped,
        ReadableBalance, ReadableBank,
    },
    wrapped::*,
};
