//! Expand command implementation

use super::{emit, load_portfolio};
use crate::config::{Config, OutputFormat};
use crate::schedule::ScheduleExpander;
use crate::unlock::{merge_events, UnlockEvent};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// JSON file with the schedules to expand
    pub input: PathBuf,

    /// Output format, overrides the config
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the schedule to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl ExpandArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let portfolio = load_portfolio(&self.input)?;
        let expander = ScheduleExpander::new(config.valuation.risk_free_rate);
        let events = expander
            .expand_all(&portfolio.schedules)
            .and_then(|raw| merge_events(&raw))
            .context("Expansion failed")?;
        tracing::info!(events = events.len(), "Expanded unlock schedule");

        let rendered = match self.format.unwrap_or(config.output.format) {
            OutputFormat::Json => serde_json::to_string_pretty(&events)?,
            OutputFormat::Table => format_schedule(&events),
        };
        emit(self.output.as_deref(), &rendered)
    }
}

/// Unlock schedule table, one row per merged event
fn format_schedule(events: &[UnlockEvent]) -> String {
    let header = format!("{:<11} {:<10} {:>18}\n", "Date", "Token", "Amount");
    let rows: String = events
        .iter()
        .map(|event| {
            format!(
                "{:<11} {:<10} {:>18.4}\n",
                event.date.to_string(),
                event.token_id,
                event.amount
            )
        })
        .collect();
    header + &rows
}
