//! Unlock event types

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pricing inputs snapshotted from the originating schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingInputs {
    /// Current market price per token
    pub spot: Decimal,
    /// Strike of the synthetic put
    pub strike: Decimal,
    /// Annualized volatility
    pub volatility: Decimal,
    /// Annualized risk-free rate
    pub risk_free_rate: Decimal,
}

/// A single discrete release of tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockEvent {
    /// Release date
    pub date: NaiveDate,
    /// Token released
    pub token_id: String,
    /// Tokens released, always positive
    pub amount: Decimal,
    #[serde(flatten)]
    pub pricing: PricingInputs,
}

impl UnlockEvent {
    /// Instant the tokens become liquid: 00:00 UTC on the release date
    pub fn unlock_instant(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.date.and_time(NaiveTime::MIN))
    }

    /// Whether the release has happened at `evaluation_instant`
    pub fn is_unlocked_at(&self, evaluation_instant: DateTime<Utc>) -> bool {
        self.unlock_instant() <= evaluation_instant
    }
}
