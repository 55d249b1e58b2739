//! Option pricing model module
//!
//! Prices the illiquidity discount of a locked token as a European put

mod black_scholes;
mod normal;

pub use black_scholes::{european_put_price, BlackScholesPut};
pub use normal::normal_cdf;

use thiserror::Error;

/// Inputs to a single put valuation, all as plain floats
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PutParams {
    /// Current spot price per token
    pub spot: f64,
    /// Strike price per token
    pub strike: f64,
    /// Time to expiry in years
    pub time_to_expiry: f64,
    /// Annualized risk-free rate
    pub risk_free_rate: f64,
    /// Annualized volatility
    pub volatility: f64,
}

/// Pricing contract violations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// A pricing input is outside its domain
    #[error("Invalid pricing input `{field}`: {value}")]
    InvalidInput { field: &'static str, value: String },
    /// A derived quantity does not fit in a decimal
    #[error("Decimal overflow computing `{field}`")]
    Overflow { field: &'static str },
}

/// Trait for put pricing implementations
pub trait PutPricer: Send + Sync {
    /// Price a European put, never negative
    fn put_price(&self, params: &PutParams) -> Result<f64, PricingError>;
}
