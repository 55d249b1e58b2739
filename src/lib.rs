//! vesting-dlom: fair value of vesting token positions
//!
//! This library provides the core components for:
//! - Vesting schedule expansion (cliff, daily, weekly, monthly, cron)
//! - Merging unlock events across schedules
//! - Black-Scholes put pricing of the discount for lack of marketability
//! - Portfolio aggregation into locked/unlocked totals and a time series
//! - Structured logging and metrics

pub mod cli;
pub mod config;
pub mod model;
pub mod schedule;
pub mod telemetry;
pub mod unlock;
pub mod valuation;
