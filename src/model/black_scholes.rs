//! Black-Scholes European put
//!
//! P = K*e^(-rT)*N(-d2) - S*N(-d1)
//! where d1 = (ln(S/K) + (r + 0.5*sigma^2)*T) / (sigma*sqrt(T)) and d2 = d1 - sigma*sqrt(T)

use super::{normal_cdf, PricingError, PutParams, PutPricer};

/// Closed-form Black-Scholes put pricer
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholesPut;

impl BlackScholesPut {
    /// Create a new pricer
    pub fn new() -> Self {
        Self
    }
}

impl PutPricer for BlackScholesPut {
    fn put_price(&self, params: &PutParams) -> Result<f64, PricingError> {
        european_put_price(
            params.spot,
            params.strike,
            params.time_to_expiry,
            params.risk_free_rate,
            params.volatility,
        )
    }
}

/// Price a European put. Returns 0 once the expiry has passed.
pub fn european_put_price(
    spot: f64,
    strike: f64,
    time_to_expiry: f64,
    risk_free_rate: f64,
    volatility: f64,
) -> Result<f64, PricingError> {
    ensure_positive("spot", spot)?;
    ensure_positive("strike", strike)?;
    ensure_positive("volatility", volatility)?;
    if !risk_free_rate.is_finite() {
        return Err(invalid("riskFreeRate", risk_free_rate));
    }

    if time_to_expiry.is_nan() || time_to_expiry <= 0.0 {
        return Ok(0.0);
    }

    let sigma_sqrt_t = volatility * time_to_expiry.sqrt();
    let d1 = ((spot / strike).ln()
        + (risk_free_rate + 0.5 * volatility * volatility) * time_to_expiry)
        / sigma_sqrt_t;
    let d2 = d1 - sigma_sqrt_t;

    let discounted_strike = strike * (-risk_free_rate * time_to_expiry).exp();
    let price = discounted_strike * normal_cdf(-d2) - spot * normal_cdf(-d1);

    // Approximation error can dip slightly below zero deep out of the money
    Ok(price.max(0.0))
}

fn ensure_positive(field: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value))
    }
}

fn invalid(field: &'static str, value: f64) -> PricingError {
    PricingError::InvalidInput {
        field,
        value: value.to_string(),
    }
}
