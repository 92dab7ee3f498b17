use {
    crate::{format::print_json_pretty, input::parse_bytes},
    clap::Parser,
    lendkit_math::{format, ValueKind, WrappedI80F48},
    serde::Serialize,
    std::str::FromStr,
};

#[derive(Parser)]
pub struct DecodeCmd {
    /// The 16 bytes, as hex or a JSON array
    bytes: String,

    /// What the field means, which decides how it is formatted
    #[arg(long, default_value_t = ValueKind::Default)]
    kind: ValueKind,
}

#[derive(Serialize)]
struct PrintableDecoded {
    raw: String,
    exact: String,
    formatted: String,
    approximate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

impl DecodeCmd {
    pub fn run(self) -> anyhow::Result<()> {
        let bytes = parse_bytes(&self.bytes)?;
        let wrapped = WrappedI80F48::from_bytes(&bytes)?;
        let narrowed = wrapped.to_f64();

        if let Some(warning) = &narrowed.warning {
            tracing::warn!(%warning, "Value exceeds the exact range of a double");
        }

        print_json_pretty(PrintableDecoded {
            raw: wrapped.raw().to_string(),
            exact: wrapped.to_string(),
            formatted: format(&wrapped, self.kind),
            approximate: narrowed.value,
            warning: narrowed.warning.map(|warning| warning.to_string()),
        })
    }
}

#[derive(Parser)]
pub struct EncodeCmd {
    /// A decimal number, e.g. 0.8 or -1.25
    #[arg(allow_hyphen_values = true)]
    decimal: String,
}

#[derive(Serialize)]
struct PrintableEncoded {
    value: [u8; 16],
    hex: String,
    raw: String,
    /// The value actually stored, after rounding onto the nearest tick.
    exact: String,
}

impl EncodeCmd {
    pub fn run(self) -> anyhow::Result<()> {
        let wrapped = WrappedI80F48::from_str(&self.decimal)?;

        tracing::debug!(input = %self.decimal, raw = %wrapped.raw(), "Encoded value");

        print_json_pretty(PrintableEncoded {
            value: wrapped.value,
            hex: hex::encode(wrapped.value),
            raw: wrapped.raw().to_string(),
            exact: wrapped.to_string(),
        })
    }
}
