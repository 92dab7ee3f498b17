use {
    crate::format::print_json_pretty,
    bigdecimal::BigDecimal,
    clap::Parser,
    lendkit_math::{
        compute_token_amount, format_raw_token_amount, format_token_balance, parse_native_amount,
        render::to_plain, MathError,
    },
    serde::Serialize,
    std::str::FromStr,
};

#[derive(Parser)]
pub struct BalanceCmd {
    /// Share count, as a decimal
    #[arg(allow_hyphen_values = true)]
    shares: String,

    /// Value of one share, as a decimal
    #[arg(allow_hyphen_values = true)]
    share_value: String,

    /// Decimals of the token's mint
    #[arg(long)]
    decimals: u8,
}

#[derive(Serialize)]
struct PrintableBalance {
    amount: String,
    native_units: String,
    formatted: String,
}

impl BalanceCmd {
    pub fn run(self) -> anyhow::Result<()> {
        let shares = parse_decimal(&self.shares)?;
        let share_value = parse_decimal(&self.share_value)?;
        let amount = compute_token_amount(&shares, &share_value, self.decimals);

        print_json_pretty(PrintableBalance {
            amount: to_plain(amount.amount()),
            native_units: amount.to_native_units().to_string(),
            formatted: format_token_balance(&shares, &share_value, self.decimals),
        })
    }
}

#[derive(Parser)]
pub struct AmountCmd {
    /// Amount in the token's smallest unit
    native: String,

    /// Decimals of the token's mint
    #[arg(long)]
    decimals: u8,
}

impl AmountCmd {
    pub fn run(self) -> anyhow::Result<()> {
        let native = parse_native_amount(&self.native)?;

        println!("{}", format_raw_token_amount(native, self.decimals));

        Ok(())
    }
}

fn parse_decimal(input: &str) -> Result<BigDecimal, MathError> {
    BigDecimal::from_str(input.trim())
        .map_err(|err| MathError::parse_number::<BigDecimal, _, _>(input, err))
}

// ----------------------------------- tests -----------------------------------
