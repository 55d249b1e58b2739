//! Pipeline metrics
//!
//! Emitted through the `metrics` facade; they are no-ops until a recorder is installed.

use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Full expand, merge, price and summarize run
    Pipeline,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Schedule specs expanded
    SchedulesExpanded,
    /// Raw unlock events before merging
    UnlockEventsGenerated,
    /// Merged events priced
    EventsPriced,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Total portfolio value of the last run
    PortfolioValue,
    /// Locked token amount of the last run
    LockedAmount,
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = match metric {
        LatencyMetric::Pipeline => "vesting_dlom_pipeline_latency_ms",
    };

    let value_ms = duration.as_secs_f64() * 1000.0;
    metrics::histogram!(metric_name).record(value_ms);
    tracing::debug!(metric = metric_name, value_ms, "Recording latency");
}

/// Increment a counter
pub fn increment_counter(metric: CounterMetric, value: u64) {
    let metric_name = match metric {
        CounterMetric::SchedulesExpanded => "vesting_dlom_schedules_expanded_total",
        CounterMetric::UnlockEventsGenerated => "vesting_dlom_unlock_events_total",
        CounterMetric::EventsPriced => "vesting_dlom_events_priced_total",
    };

    metrics::counter!(metric_name).increment(value);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    let metric_name = match metric {
        GaugeMetric::PortfolioValue => "vesting_dlom_portfolio_value",
        GaugeMetric::LockedAmount => "vesting_dlom_locked_amount",
    };

    metrics::gauge!(metric_name).set(value);
    tracing::debug!(metric = metric_name, value, "Setting gauge");
}
