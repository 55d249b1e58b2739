//! Cron-driven release dates
//!
//! Five-field expressions (`min hour dom mon dow`) follow standard cron: seconds are fixed
//! at 0 and day-of-week numbers run 0-7 with both 0 and 7 meaning Sunday. Six and
//! seven-field expressions are passed to the `cron` crate unchanged and use its
//! numbering (1 = Sunday). Names such as `Mon-Fri` mean the same in both forms.

use super::ScheduleError;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use ::cron::Schedule;
use std::collections::BTreeSet;
use std::str::FromStr;

/// Parse an expression into a schedule
pub fn parse_expression(expression: &str) -> Result<Schedule, ScheduleError> {
    let invalid = |reason: String| ScheduleError::InvalidCronExpression {
        expression: expression.to_string(),
        reason,
    };

    let fields: Vec<&str> = expression.split_whitespace().collect();
    let normalized = match fields.as_slice() {
        [minute, hour, day_of_month, month, day_of_week] => {
            let day_of_week = crate_day_of_week(day_of_week).map_err(invalid)?;
            format!("0 {minute} {hour} {day_of_month} {month} {day_of_week}")
        }
        fields if fields.len() == 6 || fields.len() == 7 => fields.join(" "),
        fields => {
            return Err(invalid(format!(
                "expected 5, 6 or 7 fields, found {}",
                fields.len()
            )))
        }
    };

    Schedule::from_str(&normalized).map_err(|e| invalid(e.to_string()))
}

/// Rewrite a standard day-of-week field (0-7, Sunday = 0 or 7) into the crate's 1-7
/// numbering (Sunday = 1). Numeric ranges and steps are expanded into explicit lists so
/// ranges that end on Sunday never wrap.
fn crate_day_of_week(field: &str) -> Result<String, String> {
    let items = field
        .split(',')
        .map(|item| {
            if item == "*" || item == "?" || item.chars().any(|c| c.is_ascii_alphabetic()) {
                return Ok(item.to_string());
            }

            let (range, step) = match item.split_once('/') {
                Some((range, step)) => {
                    let step: usize = step
                        .parse()
                        .map_err(|_| format!("invalid day-of-week step `{step}`"))?;
                    if step == 0 {
                        return Err("day-of-week step must be positive".to_string());
                    }
                    (range, Some(step))
                }
                None => (item, None),
            };

            let (first, last) = match range {
                "*" => (0, 6),
                range => match range.split_once('-') {
                    Some((first, last)) => (weekday(first)?, weekday(last)?),
                    None if step.is_some() => (weekday(range)?, 6),
                    None => {
                        let day = weekday(range)?;
                        (day, day)
                    }
                },
            };
            if first > last {
                return Err(format!("day-of-week range `{range}` is reversed"));
            }

            let days: BTreeSet<u32> = (first..=last)
                .step_by(step.unwrap_or(1))
                .map(|day| day % 7 + 1)
                .collect();
            Ok(days
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(","))
        })
        .collect::<Result<Vec<_>, String>>()?;

    Ok(items.join(","))
}

fn weekday(raw: &str) -> Result<u32, String> {
    match raw.parse::<u32>() {
        Ok(day) if day <= 7 => Ok(day),
        _ => Err(format!("day of week `{raw}` is outside 0-7")),
    }
}

/// Calendar days in `[start, end]` on which the expression fires at least once
pub fn release_dates(
    expression: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<NaiveDate>, ScheduleError> {
    let schedule = parse_expression(expression)?;
    let Some(range_end) = end.succ_opt().map(midnight) else {
        return Ok(Vec::new());
    };

    let mut dates = Vec::new();
    let mut cursor = midnight(start) - Duration::seconds(1);
    while let Some(fire) = schedule.after(&cursor).next() {
        if fire >= range_end {
            break;
        }
        let date = fire.date_naive();
        dates.push(date);

        // Later firings on the same day release nothing extra
        match date.succ_opt() {
            Some(next_day) => cursor = midnight(next_day) - Duration::seconds(1),
            None => break,
        }
    }

    Ok(dates)
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}
