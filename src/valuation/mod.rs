//! Valuation module
//!
//! Prices unlock events with the DLOM put and aggregates them into a portfolio summary

mod aggregator;
mod engine;
mod report;
mod types;

pub use aggregator::summarize;
pub use engine::{year_fraction, DiscountEngine, DAYS_PER_YEAR};
pub use types::{
    PortfolioSummary, PricedEvent, SeriesPoint, SeriesView, TimeSeriesPoint, TokenSummary,
    Valuation, ValuationError,
};

use crate::config::ValuationConfig;
use crate::schedule::{ScheduleExpander, ScheduleSpec};
use crate::telemetry::{
    increment_counter, record_latency, set_gauge, CounterMetric, GaugeMetric, LatencyMetric,
};
use crate::unlock::merge_events;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use std::time::Instant;

/// Run the full pipeline: expand, merge, price and summarize.
///
/// Fails on the first invalid schedule or decimal overflow; no partial summary is produced.
#[tracing::instrument(skip_all, fields(schedules = specs.len(), %evaluation_instant))]
pub fn value_portfolio(
    specs: &[ScheduleSpec],
    evaluation_instant: DateTime<Utc>,
    config: &ValuationConfig,
) -> Result<Valuation, ValuationError> {
    let started = Instant::now();

    let expander = ScheduleExpander::new(config.risk_free_rate);
    let raw = expander.expand_all(specs)?;
    let merged = merge_events(&raw)?;
    increment_counter(CounterMetric::SchedulesExpanded, specs.len() as u64);
    increment_counter(CounterMetric::UnlockEventsGenerated, raw.len() as u64);
    tracing::debug!(raw = raw.len(), merged = merged.len(), "Merged unlock events");

    let events = DiscountEngine::new()
        .price(&merged, evaluation_instant)
        .map_err(|e| {
            tracing::error!(error = %e, "Pricing failed on validated inputs");
            ValuationError::Pricing(e)
        })?;
    increment_counter(CounterMetric::EventsPriced, events.len() as u64);

    let summary = summarize(&events, evaluation_instant)?;
    record_latency(LatencyMetric::Pipeline, started.elapsed());
    if let Some(value) = summary.total_value.to_f64() {
        set_gauge(GaugeMetric::PortfolioValue, value);
    }
    if let Some(locked) = summary.total_locked_amount.to_f64() {
        set_gauge(GaugeMetric::LockedAmount, locked);
    }
    tracing::info!(
        events = events.len(),
        total_value = %summary.total_value,
        locked_amount = %summary.total_locked_amount,
        "Portfolio valued"
    );

    Ok(Valuation { summary, events })
}
