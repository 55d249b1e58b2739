//! Unlock event module
//!
//! Discrete token releases and their coalescing across schedules

mod merger;
mod types;

pub use merger::merge_events;
pub use types::{PricingInputs, UnlockEvent};
