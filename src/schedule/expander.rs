//! Schedule expansion into discrete unlock events

use super::types::ensure_non_negative;
use super::{Frequency, ScheduleError, ScheduleKind, ScheduleSpec};
use crate::unlock::UnlockEvent;
use crate::valuation::ValuationError;
use chrono::{Duration, Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places kept on each equal slice so running sums stay exact
const AMOUNT_SCALE: u32 = 12;

/// Turns schedule specs into unlock events
#[derive(Debug, Clone, Default)]
pub struct ScheduleExpander {
    /// Rate applied to specs that carry no `riskFreeRate`
    default_risk_free_rate: Decimal,
}

impl ScheduleExpander {
    /// Create an expander with the configured default risk-free rate
    pub fn new(default_risk_free_rate: Decimal) -> Self {
        Self {
            default_risk_free_rate,
        }
    }

    /// Expand one schedule into date-ordered events whose amounts sum to the total
    pub fn expand(&self, spec: &ScheduleSpec) -> Result<Vec<UnlockEvent>, ScheduleError> {
        spec.validate()?;
        let pricing = spec.pricing_inputs(self.default_risk_free_rate);
        ensure_non_negative("riskFreeRate", pricing.risk_free_rate)?;

        let dates = release_dates(spec)?;
        let Some(last_index) = dates.len().checked_sub(1) else {
            return Err(ScheduleError::EmptySchedule {
                frequency: spec
                    .frequency
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "cliff".to_string()),
            });
        };

        // Equal split, the last slice takes the remainder
        let slice = split_amount(spec.total_amount, dates.len())?;
        let remainder = spec.total_amount - slice * Decimal::from(last_index);

        let events = dates
            .into_iter()
            .enumerate()
            .map(|(i, date)| UnlockEvent {
                date,
                token_id: spec.token_id.clone(),
                amount: if i == last_index { remainder } else { slice },
                pricing,
            })
            .collect();

        Ok(events)
    }

    /// Expand a batch, stopping at the first invalid schedule
    pub fn expand_all(&self, specs: &[ScheduleSpec]) -> Result<Vec<UnlockEvent>, ValuationError> {
        let mut events = Vec::new();
        for (index, spec) in specs.iter().enumerate() {
            let expanded = self
                .expand(spec)
                .map_err(|source| ValuationError::Schedule {
                    index,
                    token_id: spec.token_id.clone(),
                    source,
                })?;
            tracing::debug!(
                index,
                token_id = %spec.token_id,
                events = expanded.len(),
                "Expanded schedule"
            );
            events.extend(expanded);
        }
        Ok(events)
    }
}

fn release_dates(spec: &ScheduleSpec) -> Result<Vec<NaiveDate>, ScheduleError> {
    let start = spec.start_date;
    let (end, frequency) = match (spec.kind, spec.end_date, &spec.frequency) {
        (ScheduleKind::Cliff, _, _) => return Ok(vec![start]),
        (ScheduleKind::Linear, Some(end), Some(frequency)) => (end, frequency),
        (ScheduleKind::Linear, None, _) => {
            return Err(ScheduleError::invalid("endDate", "required for linear schedules"))
        }
        (ScheduleKind::Linear, _, None) => {
            return Err(ScheduleError::invalid(
                "frequency",
                "required for linear schedules",
            ))
        }
    };

    let dates = match frequency {
        Frequency::Daily { interval_days } => step_days(start, end, i64::from(*interval_days)),
        Frequency::Weekly => step_days(start, end, 7),
        Frequency::Monthly => step_months(start, end),
        Frequency::Cron { expression } => super::cron::release_dates(expression, start, end)?,
    };
    Ok(dates)
}

/// Equal slice truncated to `AMOUNT_SCALE` places, or to the first finer scale that keeps
/// it positive. Truncation keeps the remainder at least as large as the slice.
fn split_amount(total: Decimal, releases: usize) -> Result<Decimal, ScheduleError> {
    let exact = total / Decimal::from(releases);
    (AMOUNT_SCALE..=Decimal::MAX_SCALE)
        .map(|scale| exact.round_dp_with_strategy(scale, RoundingStrategy::ToZero))
        .find(|slice| !slice.is_zero())
        .ok_or_else(|| {
            ScheduleError::invalid(
                "totalAmount",
                format!("{total} is too small to split across {releases} releases"),
            )
        })
}

fn step_days(start: NaiveDate, end: NaiveDate, step: i64) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = start;
    while current <= end {
        dates.push(current);
        match current.checked_add_signed(Duration::days(step)) {
            Some(next) => current = next,
            None => break,
        }
    }
    dates
}

/// Month offsets are taken from the anchor so a 31st start keeps returning to the 31st
fn step_months(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    (0u32..)
        .map_while(|k| start.checked_add_months(Months::new(k)))
        .take_while(|date| *date <= end)
        .collect()
}
