//! Value command implementation

use super::{emit, load_portfolio, parse_instant};
use crate::config::{Config, OutputFormat};
use crate::valuation::{value_portfolio, SeriesView};
use anyhow::Context;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValueArgs {
    /// JSON file with the schedules to value
    pub input: PathBuf,

    /// Evaluation instant (RFC 3339 or YYYY-MM-DD), defaults to now
    #[arg(long)]
    pub at: Option<String>,

    /// Output format, overrides the config
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Time series view, overrides the config
    #[arg(long, value_enum)]
    pub view: Option<SeriesView>,

    /// Write the report to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl ValueArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let portfolio = load_portfolio(&self.input)?;
        let evaluation_instant = match &self.at {
            Some(raw) => parse_instant(raw)?,
            None => portfolio.evaluation_instant.unwrap_or_else(Utc::now),
        };
        tracing::info!(
            schedules = portfolio.schedules.len(),
            %evaluation_instant,
            "Valuing portfolio from {:?}",
            self.input
        );

        let valuation =
            value_portfolio(&portfolio.schedules, evaluation_instant, &config.valuation)
                .context("Valuation failed")?;

        let view = self.view.unwrap_or(config.output.view);
        let rendered = match self.format.unwrap_or(config.output.format) {
            OutputFormat::Table => valuation.format_table(view),
            OutputFormat::Json => serde_json::to_string_pretty(&valuation)?,
        };
        emit(self.output.as_deref(), &rendered)?;

        tracing::info!(
            total_value = %valuation.summary.total_value,
            events = valuation.events.len(),
            "Valuation complete"
        );
        Ok(())
    }
}
