//! Valuation types

use crate::model::PricingError;
use crate::schedule::ScheduleError;
use crate::unlock::UnlockEvent;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// An unlock event with its illiquidity discount applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedEvent {
    #[serde(flatten)]
    pub event: UnlockEvent,
    /// Years from the evaluation instant to the unlock, never negative
    pub time_to_expiry: f64,
    /// Synthetic put premium per token
    pub put_premium: Decimal,
    /// Spot less the put premium, floored at zero
    pub discounted_price: Decimal,
    /// Put premium as a percentage of spot
    pub discount_percent: Decimal,
    /// Value of the whole release
    pub event_value: Decimal,
    /// Released at or before the evaluation instant
    pub unlocked: bool,
}

/// Per-date bucket of the portfolio time series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub unlocked_amount: Decimal,
    pub locked_amount: Decimal,
    pub unlocked_value: Decimal,
    pub locked_value: Decimal,
    pub cumulative_unlocked_amount: Decimal,
    pub cumulative_locked_amount: Decimal,
    /// All tokens released up to and including this date
    pub cumulative_amount: Decimal,
    pub cumulative_value: Decimal,
    /// Tokens still to be released after this date
    pub remaining_amount: Decimal,
}

impl TimeSeriesPoint {
    pub(crate) fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            unlocked_amount: Decimal::ZERO,
            locked_amount: Decimal::ZERO,
            unlocked_value: Decimal::ZERO,
            locked_value: Decimal::ZERO,
            cumulative_unlocked_amount: Decimal::ZERO,
            cumulative_locked_amount: Decimal::ZERO,
            cumulative_amount: Decimal::ZERO,
            cumulative_value: Decimal::ZERO,
            remaining_amount: Decimal::ZERO,
        }
    }
}

/// Totals for a single token
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSummary {
    pub unlocked_amount: Decimal,
    pub locked_amount: Decimal,
    pub value: Decimal,
}

/// Portfolio-level aggregate of priced events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub evaluation_instant: DateTime<Utc>,
    pub total_unlocked_amount: Decimal,
    pub total_locked_amount: Decimal,
    pub total_amount: Decimal,
    pub total_unlocked_value: Decimal,
    pub total_locked_value: Decimal,
    pub total_value: Decimal,
    pub by_token: BTreeMap<String, TokenSummary>,
    /// Ascending by date
    pub time_series: Vec<TimeSeriesPoint>,
}

/// How the time series is presented
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesView {
    /// Amounts and values released on each date
    PerPeriod,
    /// Running totals up to each date
    #[default]
    Cumulative,
}

/// One row of a time series view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub unlocked_amount: Decimal,
    pub locked_amount: Decimal,
    pub value: Decimal,
}

/// Complete pipeline output handed to renderers and persistence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Valuation {
    pub summary: PortfolioSummary,
    pub events: Vec<PricedEvent>,
}

/// Pipeline errors. Any error aborts the whole batch.
#[derive(Debug, Error)]
pub enum ValuationError {
    /// A schedule failed validation or expansion
    #[error("Schedule #{index} (token `{token_id}`): {source}")]
    Schedule {
        index: usize,
        token_id: String,
        #[source]
        source: ScheduleError,
    },
    /// The pricer rejected inputs that passed validation
    #[error("Pricing failed: {0}")]
    Pricing(#[from] PricingError),
    /// A running total does not fit in a decimal
    #[error("Decimal overflow summing {quantity}")]
    Overflow { quantity: &'static str },
}
