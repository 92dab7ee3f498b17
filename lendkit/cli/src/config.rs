use {
    config_parser::parse_config,
    lendkit_math::{MathResult, WrappedI80F48},
    serde::{Deserialize, Serialize},
    std::{collections::BTreeMap, path::Path, str::FromStr},
};

pub const DEFAULT_CONFIG_FILE: &str = "lendkit.toml";

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub display: DisplayConfig,
    /// Risk weights per token symbol.
    pub tokens: BTreeMap<String, TokenWeights>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            display: DisplayConfig::default(),
            tokens: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load the config at `path`. Without a path, `./lendkit.toml` is used if
    /// it exists, and the defaults otherwise.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Ok(parse_config(path)?),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Ok(parse_config(DEFAULT_CONFIG_FILE)?)
            },
            None => Ok(Self::default()),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Render damaged fields as placeholders instead of failing the report.
    pub placeholder_on_error: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            placeholder_on_error: true,
        }
    }
}

/// Risk weights of a token, written as decimal strings so that they reach the
/// encoder without passing through a float.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenWeights {
    pub mint_decimals: u8,
    pub asset_weight_init: String,
    pub asset_weight_maint: String,
    pub liability_weight_init: String,
    pub liability_weight_maint: String,
}

/// The weights as they go into a bank configuration instruction.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EncodedWeights {
    pub mint_decimals: u8,
    pub asset_weight_init: WrappedI80F48,
    pub asset_weight_maint: WrappedI80F48,
    pub liability_weight_init: WrappedI80F48,
    pub liability_weight_maint: WrappedI80F48,
}

impl TokenWeights {
    pub fn encode(&self) -> MathResult<EncodedWeights> {
        Ok(EncodedWeights {
            mint_decimals: self.mint_decimals,
            asset_weight_init: WrappedI80F48::from_str(&self.asset_weight_init)?,
            asset_weight_maint: WrappedI80F48::from_str(&self.asset_weight_maint)?,
            liability_weight_init: WrappedI80F48::from_str(&self.liability_weight_init)?,
            liability_weight_maint: WrappedI80F48::from_str(&self.liability_weight_maint)?,
        })
    }
}

// ----------------------------------- tests -----------------------------------
