mod amount;
mod bank;
mod config;
mod format;
mod input;
mod tokens;
mod wrapped;

use {
    crate::{
        amount::{AmountCmd, BalanceCmd},
        bank::BankCmd,
        config::Config,
        tokens::TokensCmd,
        wrapped::{DecodeCmd, EncodeCmd},
    },
    clap::Parser,
    std::path::PathBuf,
    tracing::metadata::LevelFilter,
};

#[derive(Parser)]
#[command(author, version, about, next_display_order = None)]
struct Cli {
    /// Path to the config file [default: ./lendkit.toml, if present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Decode a wrapped fixed-point value
    Decode(DecodeCmd),

    /// Encode a decimal into a wrapped fixed-point value
    Encode(EncodeCmd),

    /// Compute the token amount behind a share balance
    Balance(BalanceCmd),

    /// Format a native token amount
    Amount(AmountCmd),

    /// Encode the risk weights of every configured token
    Tokens(TokensCmd),

    /// Render a bank account dump
    Bank(BankCmd),
}

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Parse the config file, falling back to defaults.
    let cfg = Config::load(cli.config.as_deref())?;

    // Set up tracing.
    tracing_subscriber::fmt()
        .with_max_level(cfg.log_level.parse::<LevelFilter>()?)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Decode(cmd) => cmd.run(),
        Command::Encode(cmd) => cmd.run(),
        Command::Balance(cmd) => cmd.run(),
        Command::Amount(cmd) => cmd.run(),
        Command::Tokens(cmd) => cmd.run(&cfg),
        Command::Bank(cmd) => cmd.run(&cfg),
    }
}
