//! Portfolio input documents

use crate::schedule::ScheduleSpec;
use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Schedules plus an optional pinned evaluation instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioInput {
    pub schedules: Vec<ScheduleSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_instant: Option<DateTime<Utc>>,
}

/// Parse either a bare array of schedules or a `{ "schedules": [...] }` document
pub fn parse_portfolio(raw: &str) -> anyhow::Result<PortfolioInput> {
    let value: serde_json::Value = serde_json::from_str(raw).context("Input is not valid JSON")?;
    if value.is_array() {
        let schedules = serde_json::from_value(value).context("Invalid schedule list")?;
        return Ok(PortfolioInput {
            schedules,
            evaluation_instant: None,
        });
    }
    serde_json::from_value(value).context("Invalid portfolio document")
}

/// Read and parse a portfolio file
pub fn load_portfolio(path: impl AsRef<Path>) -> anyhow::Result<PortfolioInput> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_portfolio(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Accept RFC 3339 instants or plain dates (taken as 00:00 UTC)
pub fn parse_instant(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Ok(instant.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("Expected RFC 3339 instant or YYYY-MM-DD, got `{raw}`"))?;
    Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}
