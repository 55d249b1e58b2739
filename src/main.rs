use anyhow::Context;
use clap::Parser;
use vesting_dlom::cli::{Cli, Commands};
use vesting_dlom::config::Config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration, a missing file falls back to defaults
    let config = Config::load_optional(&cli.config)
        .with_context(|| format!("Invalid config {}", cli.config))?
        .unwrap_or_else(|| {
            eprintln!("Warning: No config found at {}", cli.config);
            eprintln!("Using default configuration");
            Config::default()
        });

    // Initialize telemetry
    vesting_dlom::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Value(args) => args.execute(&config)?,
        Commands::Expand(args) => args.execute(&config)?,
        Commands::Quote(args) => args.execute()?,
        Commands::Config => {
            println!("Current configuration:");
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
