use {
    crate::{config::Config, format::print_json_pretty},
    anyhow::Context,
    clap::Parser,
    std::collections::BTreeMap,
};

#[derive(Parser)]
pub struct TokensCmd {
    /// Only encode this token
    #[arg(long)]
    symbol: Option<String>,
}

impl TokensCmd {
    pub fn run(self, cfg: &Config) -> anyhow::Result<()> {
        let mut encoded = BTreeMap::new();

        for (symbol, weights) in &cfg.tokens {
            if self.symbol.as_ref().is_some_and(|wanted| !wanted.eq_ignore_ascii_case(symbol)) {
                continue;
            }

            let weights = weights
                .encode()
                .with_context(|| format!("invalid weights for token `{symbol}`"))?;

            encoded.insert(symbol.clone(), weights);
        }

        if encoded.is_empty() {
            tracing::warn!("No matching tokens in the config");
        }

        print_json_pretty(encoded)
    }
}
