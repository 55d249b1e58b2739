//! Discount engine
//!
//! Applies the put pricer to each unlock event relative to a fixed evaluation instant

use super::PricedEvent;
use crate::model::{BlackScholesPut, PricingError, PutParams, PutPricer};
use crate::unlock::UnlockEvent;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Day count basis for time to expiry
pub const DAYS_PER_YEAR: f64 = 365.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Prices unlock events with a put pricer
#[derive(Debug, Clone)]
pub struct DiscountEngine<P = BlackScholesPut> {
    pricer: P,
}

impl DiscountEngine {
    /// Engine backed by the Black-Scholes put
    pub fn new() -> Self {
        Self {
            pricer: BlackScholesPut::new(),
        }
    }
}

impl Default for DiscountEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: PutPricer> DiscountEngine<P> {
    /// Engine backed by a custom pricer
    pub fn with_pricer(pricer: P) -> Self {
        Self { pricer }
    }

    /// Price every event, preserving input order
    pub fn price(
        &self,
        events: &[UnlockEvent],
        evaluation_instant: DateTime<Utc>,
    ) -> Result<Vec<PricedEvent>, PricingError> {
        events
            .iter()
            .map(|event| self.price_event(event, evaluation_instant))
            .collect()
    }

    /// Price a single event
    pub fn price_event(
        &self,
        event: &UnlockEvent,
        evaluation_instant: DateTime<Utc>,
    ) -> Result<PricedEvent, PricingError> {
        let pricing = &event.pricing;
        let unlocked = event.is_unlocked_at(evaluation_instant);
        let time_to_expiry = year_fraction(evaluation_instant, event.unlock_instant());

        let params = PutParams {
            spot: to_f64("spot", pricing.spot)?,
            strike: to_f64("strike", pricing.strike)?,
            time_to_expiry,
            risk_free_rate: to_f64("riskFreeRate", pricing.risk_free_rate)?,
            volatility: to_f64("volatility", pricing.volatility)?,
        };
        let premium = self.pricer.put_price(&params)?;
        let put_premium =
            Decimal::try_from(premium).map_err(|_| PricingError::InvalidInput {
                field: "putPremium",
                value: premium.to_string(),
            })?;

        let spot = pricing.spot;
        let discounted_price = (spot - put_premium).max(Decimal::ZERO);
        let discount_percent = put_premium
            .checked_div(spot)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .ok_or(PricingError::Overflow {
                field: "discountPercent",
            })?;
        let unit_value = if unlocked { spot } else { discounted_price };
        let event_value = unit_value
            .checked_mul(event.amount)
            .ok_or(PricingError::Overflow {
                field: "eventValue",
            })?;

        Ok(PricedEvent {
            event: event.clone(),
            time_to_expiry,
            put_premium,
            discounted_price,
            discount_percent,
            event_value,
            unlocked,
        })
    }
}

/// Years between two instants on an actual/365 basis, floored at zero
pub fn year_fraction(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    let seconds = (to - from).num_seconds();
    if seconds <= 0 {
        return 0.0;
    }
    seconds as f64 / (DAYS_PER_YEAR * SECONDS_PER_DAY)
}

fn to_f64(field: &'static str, value: Decimal) -> Result<f64, PricingError> {
    value.to_f64().ok_or_else(|| PricingError::InvalidInput {
        field,
        value: value.to_string(),
    })
}
