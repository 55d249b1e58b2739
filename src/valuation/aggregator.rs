//! Portfolio aggregation of priced events

use super::{
    PortfolioSummary, PricedEvent, SeriesPoint, SeriesView, TimeSeriesPoint, TokenSummary,
    ValuationError,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Summarize priced events into portfolio totals and a per-date series.
///
/// Events are bucketed by the `unlocked` flag set at pricing time, so the locked and
/// unlocked totals always agree with each event's value. `evaluation_instant` is
/// recorded on the summary and should be the instant the events were priced at.
pub fn summarize(
    events: &[PricedEvent],
    evaluation_instant: DateTime<Utc>,
) -> Result<PortfolioSummary, ValuationError> {
    let mut buckets: BTreeMap<NaiveDate, TimeSeriesPoint> = BTreeMap::new();
    let mut by_token: BTreeMap<String, TokenSummary> = BTreeMap::new();
    let mut unlocked_amount = Decimal::ZERO;
    let mut locked_amount = Decimal::ZERO;
    let mut unlocked_value = Decimal::ZERO;
    let mut locked_value = Decimal::ZERO;

    for priced in events {
        let event = &priced.event;
        let bucket = buckets
            .entry(event.date)
            .or_insert_with(|| TimeSeriesPoint::empty(event.date));
        let token = by_token.entry(event.token_id.clone()).or_default();
        add(&mut token.value, priced.event_value, "token value")?;

        if priced.unlocked {
            add(&mut unlocked_amount, event.amount, "unlocked amount")?;
            add(&mut unlocked_value, priced.event_value, "unlocked value")?;
            add(&mut bucket.unlocked_amount, event.amount, "unlocked amount")?;
            add(&mut bucket.unlocked_value, priced.event_value, "unlocked value")?;
            add(&mut token.unlocked_amount, event.amount, "unlocked amount")?;
        } else {
            add(&mut locked_amount, event.amount, "locked amount")?;
            add(&mut locked_value, priced.event_value, "locked value")?;
            add(&mut bucket.locked_amount, event.amount, "locked amount")?;
            add(&mut bucket.locked_value, priced.event_value, "locked value")?;
            add(&mut token.locked_amount, event.amount, "locked amount")?;
        }
    }

    // Every partial sum below is bounded by these totals
    let total_amount = sum(unlocked_amount, locked_amount, "total amount")?;
    let total_value = sum(unlocked_value, locked_value, "total value")?;

    let mut cumulative_unlocked = Decimal::ZERO;
    let mut cumulative_locked = Decimal::ZERO;
    let mut cumulative_value = Decimal::ZERO;
    let time_series = buckets
        .into_values()
        .map(|mut point| {
            cumulative_unlocked += point.unlocked_amount;
            cumulative_locked += point.locked_amount;
            cumulative_value += point.unlocked_value + point.locked_value;

            point.cumulative_unlocked_amount = cumulative_unlocked;
            point.cumulative_locked_amount = cumulative_locked;
            point.cumulative_amount = cumulative_unlocked + cumulative_locked;
            point.cumulative_value = cumulative_value;
            point.remaining_amount = total_amount - point.cumulative_amount;
            point
        })
        .collect();

    Ok(PortfolioSummary {
        evaluation_instant,
        total_unlocked_amount: unlocked_amount,
        total_locked_amount: locked_amount,
        total_amount,
        total_unlocked_value: unlocked_value,
        total_locked_value: locked_value,
        total_value,
        by_token,
        time_series,
    })
}

fn add(acc: &mut Decimal, value: Decimal, quantity: &'static str) -> Result<(), ValuationError> {
    *acc = sum(*acc, value, quantity)?;
    Ok(())
}

fn sum(a: Decimal, b: Decimal, quantity: &'static str) -> Result<Decimal, ValuationError> {
    a.checked_add(b).ok_or(ValuationError::Overflow { quantity })
}

impl PortfolioSummary {
    /// Time series in the requested view, read from the stored buckets
    pub fn series(&self, view: SeriesView) -> Vec<SeriesPoint> {
        self.time_series
            .iter()
            .map(|point| match view {
                SeriesView::PerPeriod => SeriesPoint {
                    date: point.date,
                    unlocked_amount: point.unlocked_amount,
                    locked_amount: point.locked_amount,
                    value: point.unlocked_value + point.locked_value,
                },
                SeriesView::Cumulative => SeriesPoint {
                    date: point.date,
                    unlocked_amount: point.cumulative_unlocked_amount,
                    locked_amount: point.cumulative_locked_amount,
                    value: point.cumulative_value,
                },
            })
            .collect()
    }
}
