//! Vesting schedule module
//!
//! Validates schedule specs and expands them into discrete unlock events

mod cron;
mod expander;
mod types;

pub use self::cron::{parse_expression, release_dates as cron_release_dates};
pub use expander::ScheduleExpander;
pub use types::{Frequency, ScheduleError, ScheduleKind, ScheduleSpec};
