//! Operator-facing reports over bank and lending-account dumps.
//!
//! The snapshot types deserialize the JSON an RPC client prints for the
//! on-chain accounts, keeping every wrapped field as raw bytes. The readable
//! types render each field according to what it means.

use {
    crate::{
        codec, display_or_placeholder, format_bytes, format_limit, format_token_balance,
        MathError, MathResult, ValueKind, WrappedI80F48,
    },
    bigdecimal::BigDecimal,
    serde::{Deserialize, Serialize},
    serde_with::{serde_as, skip_serializing_none, DisplayFromStr, PickFirst},
    std::convert::Infallible,
};

/// Shown for a token amount whose inputs could not be decoded.
pub const UNABLE_TO_CALCULATE: &str = "Unable to calculate";

// -------------------------------- raw fields ---------------------------------

/// A wrapped fixed-point field as it appears in a dump: `{ "value": [..] }`.
///
/// Unlike [`WrappedI80F48`], any number of bytes is accepted here, so that
/// one damaged field does not prevent the rest of the account from being
/// read.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RawWrapped {
    pub value: Vec<u8>,
}

impl RawWrapped {
    /// Stands in for an optional field missing from a dump.
    pub fn zero() -> Self {
        WrappedI80F48::ZERO.into()
    }

    pub fn to_decimal(&self) -> MathResult<BigDecimal> {
        codec::decode(&self.value)
    }
}

impl From<WrappedI80F48> for RawWrapped {
    fn from(wrapped: WrappedI80F48) -> Self {
        Self {
            value: wrapped.value.to_vec(),
        }
    }
}

// --------------------------------- snapshots ---------------------------------

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BankSnapshot {
    pub token_mint: String,
    pub mint_decimals: u8,
    #[serde(default)]
    pub bank_address: Option<String>,
    pub config: BankConfigSnapshot,
    pub asset_share_value: RawWrapped,
    pub liability_share_value: RawWrapped,
    #[serde(default = "RawWrapped::zero")]
    pub total_asset_shares: RawWrapped,
    #[serde(default = "RawWrapped::zero")]
    pub total_liability_shares: RawWrapped,
    #[serde(default = "RawWrapped::zero")]
    pub collected_insurance_fees_outstanding: RawWrapped,
    #[serde(default = "RawWrapped::zero")]
    pub collected_group_fees_outstanding: RawWrapped,
}

/// Limits are `u64` on-chain. Dumps print them either as numbers or, since
/// JSON numbers lose precision past `2^53`, as decimal strings.
#[serde_as]
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BankConfigSnapshot {
    pub asset_weight_init: RawWrapped,
    pub asset_weight_maint: RawWrapped,
    pub liability_weight_init: RawWrapped,
    pub liability_weight_maint: RawWrapped,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub deposit_limit: u64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    pub borrow_limit: u64,
    #[serde_as(as = "PickFirst<(_, DisplayFromStr)>")]
    #[serde(default)]
    pub total_asset_value_init_limit: u64,
    #[serde(default)]
    pub oracle_max_age: u16,
    pub interest_rate_config: InterestRateSnapshot,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InterestRateSnapshot {
    pub optimal_utilization_rate: RawWrapped,
    pub plateau_interest_rate: RawWrapped,
    pub max_interest_rate: RawWrapped,
    pub insurance_fee_fixed_apr: RawWrapped,
    pub insurance_ir_fee: RawWrapped,
    pub protocol_fixed_fee_apr: RawWrapped,
    pub protocol_ir_fee: RawWrapped,
}

/// One balance slot of a lending account.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSnapshot {
    /// Unused slots are zeroed but still present in the account.
    pub active: bool,
    pub bank_pk: String,
    pub asset_shares: RawWrapped,
    pub liability_shares: RawWrapped,
    #[serde(default = "RawWrapped::zero")]
    pub emissions_outstanding: RawWrapped,
}

impl BalanceSnapshot {
    /// Whether this is an active slot of `bank`. A bank dump without an
    /// address matches no slot.
    pub fn is_held_in(&self, bank: &BankSnapshot) -> bool {
        self.active && bank.bank_address.as_deref() == Some(self.bank_pk.as_str())
    }
}

// ------------------------------ readable forms -------------------------------

#[skip_serializing_none]
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReadableBank {
    pub token_mint: String,
    pub mint_decimals: u8,
    pub bank_address: Option<String>,
    pub config: ReadableBankConfig,
    pub asset_share_value: String,
    pub liability_share_value: String,
    pub total_asset_shares: String,
    pub total_liability_shares: String,
    pub collected_insurance_fees_outstanding: String,
    pub collected_group_fees_outstanding: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReadableBankConfig {
    pub asset_weight_init: String,
    pub asset_weight_maint: String,
    pub liability_weight_init: String,
    pub liability_weight_maint: String,
    pub deposit_limit: String,
    pub borrow_limit: String,
    pub total_asset_value_init_limit: String,
    pub oracle_max_age: String,
    pub interest_rate_config: ReadableInterestRates,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReadableInterestRates {
    pub optimal_utilization_rate: String,
    pub plateau_interest_rate: String,
    pub max_interest_rate: String,
    pub insurance_fee_fixed_apr: String,
    pub insurance_ir_fee: String,
    pub protocol_fixed_fee_apr: String,
    pub protocol_ir_fee: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReadableBalance {
    pub bank_address: String,
    pub token_mint: String,
    pub mint_decimals: u8,
    pub asset_shares: String,
    pub liability_shares: String,
    pub emissions_outstanding: String,
    pub token_balance: String,
    pub token_debt: String,
}

impl ReadableBank {
    /// Render every field, substituting placeholders for fields that fail to
    /// decode.
    pub fn from_snapshot(bank: &BankSnapshot) -> Self {
        match render_bank(&Lenient, bank) {
            Ok(readable) => readable,
            Err(never) => match never {},
        }
    }

    /// Render every field, failing on the first one that does not decode.
    pub fn try_from_snapshot(bank: &BankSnapshot) -> MathResult<Self> {
        render_bank(&Strict, bank)
    }
}

impl ReadableBalance {
    /// Render the active slots of a lending account that are held in `bank`,
    /// skipping every other slot.
    pub fn for_bank(balances: &[BalanceSnapshot], bank: &BankSnapshot) -> Vec<Self> {
        match render_held(&Lenient, balances, bank) {
            Ok(readable) => readable,
            Err(never) => match never {},
        }
    }

    pub fn try_for_bank(
        balances: &[BalanceSnapshot],
        bank: &BankSnapshot,
    ) -> MathResult<Vec<Self>> {
        render_held(&Strict, balances, bank)
    }

    /// Render a single balance slot against `bank`. The caller is responsible
    /// for `bank` being the one the slot points to; see [`Self::for_bank`].
    pub fn from_snapshot(balance: &BalanceSnapshot, bank: &BankSnapshot) -> Self {
        match render_balance(&Lenient, balance, bank) {
            Ok(readable) => readable,
            Err(never) => match never {},
        }
    }

    pub fn try_from_snapshot(balance: &BalanceSnapshot, bank: &BankSnapshot) -> MathResult<Self> {
        render_balance(&Strict, balance, bank)
    }
}

// --------------------------------- rendering ---------------------------------

trait Render {
    type Error;

    fn field(&self, raw: &RawWrapped, kind: ValueKind) -> Result<String, Self::Error>;

    fn token_amount(
        &self,
        shares: &RawWrapped,
        share_value: &RawWrapped,
        decimals: u8,
    ) -> Result<String, Self::Error>;
}

/// Never fails; damaged fields become placeholders.
struct Lenient;

/// Fails on the first damaged field.
struct Strict;

fn decode_pair(a: &RawWrapped, b: &RawWrapped) -> MathResult<(BigDecimal, BigDecimal)> {
    Ok((a.to_decimal()?, b.to_decimal()?))
}

impl Render for Lenient {
    type Error = Infallible;

    fn field(&self, raw: &RawWrapped, kind: ValueKind) -> Result<String, Infallible> {
        Ok(display_or_placeholder(&raw.value, kind))
    }

    fn token_amount(
        &self,
        shares: &RawWrapped,
        share_value: &RawWrapped,
        decimals: u8,
    ) -> Result<String, Infallible> {
        match decode_pair(shares, share_value) {
            Ok((shares, value)) => Ok(format_token_balance(&shares, &value, decimals)),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(err = %_err, "Failed to compute token amount");

                Ok(UNABLE_TO_CALCULATE.to_string())
            },
        }
    }
}

impl Render for Strict {
    type Error = MathError;

    fn field(&self, raw: &RawWrapped, kind: ValueKind) -> MathResult<String> {
        format_bytes(&raw.value, kind)
    }

    fn token_amount(
        &self,
        shares: &RawWrapped,
        share_value: &RawWrapped,
        decimals: u8,
    ) -> MathResult<String> {
        let (shares, value) = decode_pair(shares, share_value)?;

        Ok(format_token_balance(&shares, &value, decimals))
    }
}

fn render_bank<R: Render>(r: &R, bank: &BankSnapshot) -> Result<ReadableBank, R::Error> {
    let config = &bank.config;
    let rates = &config.interest_rate_config;

    Ok(ReadableBank {
        token_mint: bank.token_mint.clone(),
        mint_decimals: bank.mint_decimals,
        bank_address: bank.bank_address.clone(),
        config: ReadableBankConfig {
            asset_weight_init: r.field(&config.asset_weight_init, ValueKind::Weight)?,
            asset_weight_maint: r.field(&config.asset_weight_maint, ValueKind::Weight)?,
            liability_weight_init: r.field(&config.liability_weight_init, ValueKind::Weight)?,
            liability_weight_maint: r.field(&config.liability_weight_maint, ValueKind::Weight)?,
            deposit_limit: format_limit(config.deposit_limit),
            borrow_limit: format_limit(config.borrow_limit),
            total_asset_value_init_limit: format_limit(config.total_asset_value_init_limit),
            oracle_max_age: format!("{} seconds", config.oracle_max_age),
            interest_rate_config: ReadableInterestRates {
                optimal_utilization_rate: r
                    .field(&rates.optimal_utilization_rate, ValueKind::Rate)?,
                plateau_interest_rate: r.field(&rates.plateau_interest_rate, ValueKind::Rate)?,
                max_interest_rate: r.field(&rates.max_interest_rate, ValueKind::Rate)?,
                insurance_fee_fixed_apr: r.field(&rates.insurance_fee_fixed_apr, ValueKind::Fee)?,
                insurance_ir_fee: r.field(&rates.insurance_ir_fee, ValueKind::Fee)?,
                protocol_fixed_fee_apr: r.field(&rates.protocol_fixed_fee_apr, ValueKind::Fee)?,
                protocol_ir_fee: r.field(&rates.protocol_ir_fee, ValueKind::Fee)?,
            },
        },
        asset_share_value: r.field(&bank.asset_share_value, ValueKind::Share)?,
        liability_share_value: r.field(&bank.liability_share_value, ValueKind::Share)?,
        total_asset_shares: r.field(&bank.total_asset_shares, ValueKind::Balance)?,
        total_liability_shares: r.field(&bank.total_liability_shares, ValueKind::Balance)?,
        collected_insurance_fees_outstanding: r
            .field(&bank.collected_insurance_fees_outstanding, ValueKind::Balance)?,
        collected_group_fees_outstanding: r
            .field(&bank.collected_group_fees_outstanding, ValueKind::Balance)?,
    })
}

fn render_balance<R: Render>(
    r: &R,
    balance: &BalanceSnapshot,
    bank: &BankSnapshot,
) -> Result<ReadableBalance, R::Error> {
    Ok(ReadableBalance {
        bank_address: balance.bank_pk.clone(),
        token_mint: bank.token_mint.clone(),
        mint_decimals: bank.mint_decimals,
        asset_shares: r.field(&balance.asset_shares, ValueKind::Balance)?,
        liability_shares: r.field(&balance.liability_shares, ValueKind::Balance)?,
        emissions_outstanding: r.field(&balance.emissions_outstanding, ValueKind::Balance)?,
        token_balance: r.token_amount(
            &balance.asset_shares,
            &bank.asset_share_value,
            bank.mint_decimals,
        )?,
        token_debt: r.token_amount(
            &balance.liability_shares,
            &bank.liability_share_value,
            bank.mint_decimals,
        )?,
    })
}

fn render_held<R: Render>(
    r: &R,
    balances: &[BalanceSnapshot],
    bank: &BankSnapshot,
) -> Result<Vec<ReadableBalance>, R::Error> {
    balances
        .iter()
        .filter(|balance| balance.is_held_in(bank))
        .map(|balance| render_balance(r, balance, bank))
        .collect()
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {
        super::*,
        serde_json::{json, Value},
        std::str::FromStr,
    };

    fn wrapped(s: &str) -> Value {
        json!({ "value": WrappedI80F48::from_str(s).unwrap().value })
    }

    fn bank_json() -> Value {
        json!({
            "tokenMint": "So11111111111111111111111111111111111111112",
            "mintDecimals": 9,
            "bankAddress": "bank",
            "config": {
                "assetWeightInit": wrapped("0.8"),
                "assetWeightMaint": wrapped("0.9"),
                "liabilityWeightInit": wrapped("1.23"),
                "liabilityWeightMaint": wrapped("1.1"),
                "depositLimit": "18446744073709551615",
                "borrowLimit": 1000000000000_u64,
                "totalAssetValueInitLimit": "18446744073709551615",
                "oracleMaxAge": 60,
                "interestRateConfig": {
                    "optimalUtilizationRate": wrapped("0.8"),
                    "plateauInterestRate": wrapped("0.1"),
                    "maxInterestRate": wrapped("1"),
                    "insuranceFeeFixedApr": wrapped("0"),
                    "insuranceIrFee": wrapped("0.05"),
                    "protocolFixedFeeApr": wrapped("0.01"),
                    "protocolIrFee": wrapped("0.1"),
                },
            },
            "assetShareValue": wrapped("1"),
            "liabilityShareValue": wrapped("1.05"),
            "totalAssetShares": wrapped("2500000"),
            "totalLiabilityShares": wrapped("0"),
            "collectedInsuranceFeesOutstanding": wrapped("0.25"),
            "collectedGroupFeesOutstanding": wrapped("0"),
        })
    }

    fn bank() -> BankSnapshot {
        serde_json::from_value(bank_json()).unwrap()
    }

    fn slot(
        active: bool,
        bank_pk: &str,
        asset_shares: &str,
        liability_shares: &str,
    ) -> BalanceSnapshot {
        BalanceSnapshot {
            active,
            bank_pk: bank_pk.to_string(),
            asset_shares: WrappedI80F48::from_str(asset_shares).unwrap().into(),
            liability_shares: WrappedI80F48::from_str(liability_shares).unwrap().into(),
            emissions_outstanding: RawWrapped::zero(),
        }
    }

    #[test]
    fn missing_optional_fields_are_zero() {
        let mut json = bank_json();
        for key in [
            "totalAssetShares",
            "totalLiabilityShares",
            "collectedInsuranceFeesOutstanding",
            "collectedGroupFeesOutstanding",
        ] {
            json.as_object_mut().unwrap().remove(key);
        }
        let bank = serde_json::from_value::<BankSnapshot>(json).unwrap();

        assert_eq!(bank.total_asset_shares, RawWrapped::zero());

        let readable = ReadableBank::try_from_snapshot(&bank).unwrap();
        assert_eq!(readable.total_asset_shares, "0.000000");
        assert_eq!(readable.total_liability_shares, "0.000000");
        assert_eq!(readable.collected_insurance_fees_outstanding, "0.000000");
        assert_eq!(readable.collected_group_fees_outstanding, "0.000000");
    }

    #[test]
    fn readable_bank() {
        let readable = ReadableBank::from_snapshot(&bank());
        assert_eq!(ReadableBank::try_from_snapshot(&bank()).unwrap(), readable);

        assert_eq!(
            serde_json::to_value(&readable).unwrap(),
            json!({
                "tokenMint": "So11111111111111111111111111111111111111112",
                "mintDecimals": 9,
                "bankAddress": "bank",
                "config": {
                    "assetWeightInit": "0.80",
                    "assetWeightMaint": "0.90",
                    "liabilityWeightInit": "1.23",
                    "liabilityWeightMaint": "1.10",
                    "depositLimit": "Unlimited",
                    "borrowLimit": "1000000000000",
                    "totalAssetValueInitLimit": "Unlimited",
                    "oracleMaxAge": "60 seconds",
                    "interestRateConfig": {
                        "optimalUtilizationRate": "80.00%",
                        "plateauInterestRate": "10.00%",
                        "maxInterestRate": "100.00%",
                        "insuranceFeeFixedApr": "0.00%",
                        "insuranceIrFee": "5.00%",
                        "protocolFixedFeeApr": "1.00%",
                        "protocolIrFee": "10.00%",
                    },
                },
                "assetShareValue": "1.000000",
                "liabilityShareValue": "1.050000",
                "totalAssetShares": "2500000.00",
                "totalLiabilityShares": "0.000000",
                "collectedInsuranceFeesOutstanding": "0.250000",
                "collectedGroupFeesOutstanding": "0.000000",
            })
        );
    }

    #[test]
    fn damaged_field() {
        let mut json = bank_json();
        json["config"]["assetWeightInit"] = json!({ "value": [205, 204, 204, 204] });
        let bank = serde_json::from_value::<BankSnapshot>(json).unwrap();

        let readable = ReadableBank::from_snapshot(&bank);
        assert_eq!(readable.config.asset_weight_init, "[205,204,204...]");
        assert_eq!(readable.config.asset_weight_maint, "0.90");

        let err = ReadableBank::try_from_snapshot(&bank).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn limits_accept_numbers_and_strings() {
        let mut json = bank_json();
        json["config"]["depositLimit"] = json!(5);
        json["config"]["borrowLimit"] = json!("7");
        let bank = serde_json::from_value::<BankSnapshot>(json).unwrap();

        assert_eq!(bank.config.deposit_limit, 5);
        assert_eq!(bank.config.borrow_limit, 7);

        let mut json = bank_json();
        json["config"]["borrowLimit"] = json!("-1");
        assert!(serde_json::from_value::<BankSnapshot>(json).is_err());
    }

    #[test]
    fn readable_balance() {
        let balance = slot(true, "bank", "1500", "0");

        let readable = ReadableBalance::from_snapshot(&balance, &bank());
        assert_eq!(readable, ReadableBalance {
            bank_address: "bank".to_string(),
            token_mint: "So11111111111111111111111111111111111111112".to_string(),
            mint_decimals: 9,
            asset_shares: "1500.00".to_string(),
            liability_shares: "0.000000".to_string(),
            emissions_outstanding: "0.000000".to_string(),
            token_balance: "1.50K".to_string(),
            token_debt: "0".to_string(),
        });
    }

    #[test]
    fn balance_with_damaged_shares() {
        let balance = BalanceSnapshot {
            asset_shares: RawWrapped { value: vec![1, 2] },
            ..slot(true, "bank", "0", "1")
        };

        let readable = ReadableBalance::from_snapshot(&balance, &bank());
        assert_eq!(readable.asset_shares, "[1,2...]");
        assert_eq!(readable.token_balance, UNABLE_TO_CALCULATE);
        assert_eq!(readable.liability_shares, "1.00");

        assert!(ReadableBalance::try_from_snapshot(&balance, &bank())
            .unwrap_err()
            .is_format_error());
    }

    #[test]
    fn balance_slot_shape() {
        let json = json!({
            "active": true,
            "bankPk": "bank",
            "assetShares": wrapped("2"),
            "liabilityShares": wrapped("0"),
            "emissionsOutstanding": wrapped("0.5"),
        });
        let balance = serde_json::from_value::<BalanceSnapshot>(json).unwrap();
        let readable = ReadableBalance::from_snapshot(&balance, &bank());
        assert_eq!(readable.emissions_outstanding, "0.500000");

        // Older dumps carry no emissions field.
        let json = json!({
            "active": false,
            "bankPk": "bank",
            "assetShares": wrapped("0"),
            "liabilityShares": wrapped("0"),
        });
        let balance = serde_json::from_value::<BalanceSnapshot>(json).unwrap();
        assert_eq!(balance.emissions_outstanding, RawWrapped::zero());
    }

    #[test]
    fn only_active_slots_of_the_bank_are_rendered() {
        let balances = [
            slot(true, "bank", "1500", "0"),
            slot(false, "bank", "0", "0"),
            slot(true, "other-bank", "7", "0"),
            slot(true, "bank", "0", "2"),
        ];

        let readable = ReadableBalance::for_bank(&balances, &bank());
        assert_eq!(readable.len(), 2);
        assert_eq!(readable[0].token_balance, "1.50K");
        assert_eq!(readable[1].token_debt, "2.10");
        assert!(readable.iter().all(|balance| balance.bank_address == "bank"));

        assert_eq!(ReadableBalance::try_for_bank(&balances, &bank()).unwrap(), readable);
    }

    #[test]
    fn bank_without_address_holds_no_slots() {
        let mut bank = bank();
        bank.bank_address = None;

        let balances = [slot(true, "bank", "1", "0")];
        assert!(!balances[0].is_held_in(&bank));
        assert!(ReadableBalance::for_bank(&balances, &bank).is_empty());
    }

    #[test]
    fn skipped_slots_do_not_fail_strict_rendering() {
        let damaged = BalanceSnapshot {
            asset_shares: RawWrapped { value: vec![1] },
            ..slot(true, "other-bank", "0", "0")
        };

        assert!(ReadableBalance::try_for_bank(&[damaged], &bank()).unwrap().is_empty());
    }
}
