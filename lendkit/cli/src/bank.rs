use {
    crate::{config::Config, format::print_json_pretty},
    anyhow::{bail, Context},
    clap::Parser,
    lendkit_math::{BalanceSnapshot, BankSnapshot, ReadableBalance, ReadableBank},
    serde::Serialize,
    std::{
        fs,
        path::{Path, PathBuf},
    },
};

#[derive(Parser)]
pub struct BankCmd {
    /// JSON dump of the bank account
    file: PathBuf,

    /// JSON array of lending-account balances held in this bank
    #[arg(long)]
    balances: Option<PathBuf>,
}

#[derive(Serialize, Debug)]
struct PrintableBank {
    bank: ReadableBank,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    balances: Vec<ReadableBalance>,
}

impl BankCmd {
    pub fn run(self, cfg: &Config) -> anyhow::Result<()> {
        let bank: BankSnapshot = read_json(&self.file)?;
        let balances: Vec<BalanceSnapshot> = match &self.balances {
            Some(path) => read_json(path)?,
            None => Vec::new(),
        };

        print_json_pretty(render(&bank, &balances, cfg.display.placeholder_on_error)?)
    }
}

fn render(
    bank: &BankSnapshot,
    balances: &[BalanceSnapshot],
    lenient: bool,
) -> anyhow::Result<PrintableBank> {
    if !balances.is_empty() && bank.bank_address.is_none() {
        bail!("the bank dump has no `bankAddress`, so balance slots cannot be matched to it");
    }

    let (bank_report, balance_reports) = if lenient {
        (
            ReadableBank::from_snapshot(bank),
            ReadableBalance::for_bank(balances, bank),
        )
    } else {
        (
            ReadableBank::try_from_snapshot(bank)?,
            ReadableBalance::try_for_bank(balances, bank)?,
        )
    };

    tracing::debug!(
        slots = balances.len(),
        rendered = balance_reports.len(),
        "Skipped inactive slots and slots of other banks"
    );

    Ok(PrintableBank {
        bank: bank_report,
        balances: balance_reports,
    })
}

fn read_json<T>(path: &Path) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, lendkit_math::WrappedI80F48, std::io::Write};

    #[test]
    fn reads_balances() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"active": true, "bankPk": "bank", "assetShares": {{"value": [1, 2]}}, "liabilityShares": {{"value": []}}}}]"#
        )
        .unwrap();

        let balances: Vec<BalanceSnapshot> = read_json(file.path()).unwrap();
        assert_eq!(balances.len(), 1);
        assert_eq!(balances[0].bank_pk, "bank");
        assert_eq!(balances[0].asset_shares.value, [1, 2]);
    }

    #[test]
    fn reports_the_failing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = read_json::<BankSnapshot>(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("failed to parse"));
    }

    fn bank(address: Option<&str>) -> BankSnapshot {
        let rate = serde_json::json!({ "value": WrappedI80F48::ZERO.value });
        let one = serde_json::json!({ "value": WrappedI80F48::ONE.value });

        serde_json::from_value(serde_json::json!({
            "tokenMint": "mint",
            "mintDecimals": 6,
            "bankAddress": address,
            "config": {
                "assetWeightInit": one,
                "assetWeightMaint": one,
                "liabilityWeightInit": one,
                "liabilityWeightMaint": one,
                "depositLimit": 0,
                "borrowLimit": 0,
                "interestRateConfig": {
                    "optimalUtilizationRate": rate,
                    "plateauInterestRate": rate,
                    "maxInterestRate": rate,
                    "insuranceFeeFixedApr": rate,
                    "insuranceIrFee": rate,
                    "protocolFixedFeeApr": rate,
                    "protocolIrFee": rate,
                },
            },
            "assetShareValue": one,
            "liabilityShareValue": one,
        }))
        .unwrap()
    }

    fn slot(active: bool, bank_pk: &str) -> BalanceSnapshot {
        BalanceSnapshot {
            active,
            bank_pk: bank_pk.to_string(),
            asset_shares: WrappedI80F48::ONE.into(),
            liability_shares: WrappedI80F48::ZERO.into(),
            emissions_outstanding: WrappedI80F48::ZERO.into(),
        }
    }

    #[test]
    fn renders_only_slots_of_this_bank() {
        let balances = [slot(true, "bank"), slot(false, "bank"), slot(true, "other")];

        let printable = render(&bank(Some("bank")), &balances, true).unwrap();
        assert_eq!(printable.balances.len(), 1);
        assert_eq!(printable.balances[0].token_balance, "1.00");
    }

    #[test]
    fn balances_need_a_bank_address() {
        let err = render(&bank(None), &[slot(true, "bank")], true).unwrap_err();
        assert!(err.to_string().contains("bankAddress"));

        // Without balances the address is not needed.
        assert!(render(&bank(None), &[], false).is_ok());
    }
}
