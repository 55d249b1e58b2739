//! CLI interface for vesting-dlom
//!
//! Provides subcommands for:
//! - `value`: Price a portfolio of vesting schedules
//! - `expand`: Show the merged unlock schedule without pricing
//! - `quote`: Price a single DLOM put
//! - `config`: Show the effective configuration

mod expand;
mod input;
mod quote;
mod value;

pub use expand::ExpandArgs;
pub use input::{load_portfolio, parse_instant, parse_portfolio, PortfolioInput};
pub use quote::QuoteArgs;
pub use value::ValueArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vesting-dlom")]
#[command(about = "Fair value of vesting token unlocks with a Black-Scholes illiquidity discount")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price a portfolio of vesting schedules
    Value(ValueArgs),
    /// Show the merged unlock schedule
    Expand(ExpandArgs),
    /// Price a single DLOM put
    Quote(QuoteArgs),
    /// Show the effective configuration
    Config,
}

/// Write to a file when given, stdout otherwise
pub(crate) fn emit(output: Option<&std::path::Path>, rendered: &str) -> anyhow::Result<()> {
    use anyhow::Context;

    match output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}
