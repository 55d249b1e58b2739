//! Vesting schedule types

use crate::unlock::PricingInputs;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Shape of a vesting tranche
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleKind {
    /// Whole amount released on the start date
    Cliff,
    /// Amount released in equal slices between start and end date
    Linear,
}

/// Release cadence of a linear schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Frequency {
    /// Every `interval_days` days
    Daily {
        #[serde(rename = "intervalDays", default = "default_interval_days")]
        interval_days: u32,
    },
    /// Every 7 days
    Weekly,
    /// Same day of month, clamped to the month length
    Monthly,
    /// Calendar days on which the cron expression fires
    Cron { expression: String },
}

fn default_interval_days() -> u32 {
    1
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily { interval_days: 1 } => write!(f, "daily"),
            Frequency::Daily { interval_days } => write!(f, "every {interval_days} days"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::Cron { expression } => write!(f, "cron `{expression}`"),
        }
    }
}

/// One vesting tranche as supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSpec {
    /// Cliff or linear release
    pub kind: ScheduleKind,
    /// Total tokens released by this schedule
    pub total_amount: Decimal,
    /// First release date (the only one for a cliff)
    pub start_date: NaiveDate,
    /// Last possible release date, linear only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Release cadence, linear only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    /// Current market price per token
    pub spot: Decimal,
    /// Strike of the synthetic put
    pub strike: Decimal,
    /// Annualized volatility, 0.6 = 60%
    pub volatility: Decimal,
    /// Annualized risk-free rate; the configured default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_free_rate: Option<Decimal>,
    /// Token the schedule releases
    pub token_id: String,
}

impl ScheduleSpec {
    /// Check every field needed for expansion
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.token_id.trim().is_empty() {
            return Err(ScheduleError::invalid("tokenId", "must not be empty"));
        }
        ensure_positive("totalAmount", self.total_amount)?;
        ensure_positive("spot", self.spot)?;
        ensure_positive("strike", self.strike)?;
        ensure_positive("volatility", self.volatility)?;
        if let Some(rate) = self.risk_free_rate {
            ensure_non_negative("riskFreeRate", rate)?;
        }

        if self.kind == ScheduleKind::Linear {
            let end = self.end_date.ok_or_else(|| {
                ScheduleError::invalid("endDate", "required for linear schedules")
            })?;
            if end <= self.start_date {
                return Err(ScheduleError::invalid(
                    "endDate",
                    format!("{} must be after startDate {}", end, self.start_date),
                ));
            }
            match &self.frequency {
                None => {
                    return Err(ScheduleError::invalid(
                        "frequency",
                        "required for linear schedules",
                    ))
                }
                Some(Frequency::Daily { interval_days: 0 }) => {
                    return Err(ScheduleError::invalid(
                        "frequency.intervalDays",
                        "must be at least 1",
                    ))
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Pricing snapshot carried by every event of this schedule
    pub fn pricing_inputs(&self, default_risk_free_rate: Decimal) -> PricingInputs {
        PricingInputs {
            spot: self.spot,
            strike: self.strike,
            volatility: self.volatility,
            risk_free_rate: self.risk_free_rate.unwrap_or(default_risk_free_rate),
        }
    }
}

fn ensure_positive(field: &'static str, value: Decimal) -> Result<(), ScheduleError> {
    if value > Decimal::ZERO {
        Ok(())
    } else {
        Err(ScheduleError::invalid(
            field,
            format!("must be positive, got {value}"),
        ))
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: Decimal) -> Result<(), ScheduleError> {
    if value >= Decimal::ZERO {
        Ok(())
    } else {
        Err(ScheduleError::invalid(
            field,
            format!("must not be negative, got {value}"),
        ))
    }
}

/// Schedule validation and expansion errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// A field is missing or out of range
    #[error("Invalid schedule field `{field}`: {reason}")]
    InvalidSchedule { field: &'static str, reason: String },
    /// The cron expression could not be parsed
    #[error("Invalid cron expression `{expression}`: {reason}")]
    InvalidCronExpression { expression: String, reason: String },
    /// The frequency yielded no release date inside the interval
    #[error("Schedule produced no unlock dates ({frequency})")]
    EmptySchedule { frequency: String },
}

impl ScheduleError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ScheduleError::InvalidSchedule {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ScheduleError::InvalidSchedule { field, .. } => field,
            ScheduleError::InvalidCronExpression { .. } => "frequency.expression",
            ScheduleError::EmptySchedule { .. } => "frequency",
        }
    }
}
