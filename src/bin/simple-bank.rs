use anyhow::{Context, Result};
use clap::Parser;
use simple_bank::{bin_utils::Service, registry::RegistryConfig};
use tracing::Level;

/// In-memory bank ledger operated through a text menu
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Prefix of generated account numbers
    #[arg(long, default_value = "ACC")]
    id_prefix: String,

    /// Counter value before the first account; the first number is one above it
    #[arg(long, default_value_t = 1000)]
    first_sequence: u64,

    /// Shown in front of every balance
    #[arg(long, default_value = "$")]
    currency_symbol: String,

    /// Log verbosity, logs go to stderr
    #[arg(long, default_value_t = Level::WARN)]
    log_level: Level,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    let service = Service {
        input: std::io::stdin().lock(),
        output: &mut std::io::stdout(),
        registry_config: RegistryConfig {
            id_prefix: args.id_prefix,
            first_sequence: args.first_sequence,
        },
        currency_symbol: args.currency_symbol,
    };
    service.run().context("Bank session failed")
}
