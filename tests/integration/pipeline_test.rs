//! End-to-end valuation tests

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc, Weekday};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use vesting_dlom::config::ValuationConfig;
use vesting_dlom::model::PricingError;
use vesting_dlom::schedule::{Frequency, ScheduleError, ScheduleKind, ScheduleSpec};
use vesting_dlom::valuation::{value_portfolio, SeriesView, Valuation, ValuationError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn midnight(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn cliff(token: &str, amount: Decimal, on: NaiveDate) -> ScheduleSpec {
    ScheduleSpec {
        kind: ScheduleKind::Cliff,
        total_amount: amount,
        start_date: on,
        end_date: None,
        frequency: None,
        spot: dec!(150),
        strike: dec!(150),
        volatility: dec!(0.87),
        risk_free_rate: Some(dec!(0)),
        token_id: token.to_string(),
    }
}

fn linear(
    token: &str,
    amount: Decimal,
    start: NaiveDate,
    end: NaiveDate,
    frequency: Frequency,
) -> ScheduleSpec {
    ScheduleSpec {
        kind: ScheduleKind::Linear,
        total_amount: amount,
        start_date: start,
        end_date: Some(end),
        frequency: Some(frequency),
        spot: dec!(2),
        strike: dec!(2),
        volatility: dec!(0.8),
        risk_free_rate: None,
        token_id: token.to_string(),
    }
}

#[test]
fn test_cliff_unlocking_today_is_undiscounted() {
    let now = Utc.with_ymd_and_hms(2025, 3, 14, 9, 45, 0).unwrap();
    let spec = cliff("sui", dec!(100000), now.date_naive());

    let valuation = value_portfolio(&[spec], now, &ValuationConfig::default()).unwrap();

    assert_eq!(valuation.events.len(), 1);
    let priced = &valuation.events[0];
    assert_eq!(priced.put_premium, Decimal::ZERO);
    assert_eq!(priced.discounted_price, dec!(150));
    assert_eq!(valuation.summary.total_unlocked_amount, dec!(100000));
    assert_eq!(valuation.summary.total_value, dec!(15000000));
}

#[test]
fn test_daily_linear_over_leap_year() {
    let spec = linear(
        "arb",
        dec!(36500),
        date(2024, 1, 1),
        date(2024, 12, 31),
        Frequency::Daily { interval_days: 1 },
    );

    let valuation = value_portfolio(&[spec], midnight(2023, 6, 1), &ValuationConfig::default()).unwrap();

    assert_eq!(valuation.events.len(), 366);
    let total: Decimal = valuation.events.iter().map(|p| p.event.amount).sum();
    assert_eq!(total, dec!(36500));
    for priced in &valuation.events {
        assert!((priced.event.amount - dec!(99.7268)).abs() < dec!(0.001));
    }
    assert_eq!(valuation.summary.total_locked_amount, dec!(36500));
    assert_eq!(valuation.summary.total_unlocked_amount, Decimal::ZERO);
}

#[test]
fn test_atm_discount_one_year_out() {
    let mut spec = cliff("apt", dec!(1), date(2026, 1, 1));
    spec.spot = dec!(100);
    spec.strike = dec!(100);
    spec.volatility = dec!(0.6);

    let valuation = value_portfolio(&[spec], midnight(2025, 1, 1), &ValuationConfig::default()).unwrap();

    let priced = &valuation.events[0];
    assert!((priced.time_to_expiry - 1.0).abs() < 1e-12);
    assert!((priced.put_premium - dec!(23.58)).abs() < dec!(0.01));
    assert!((priced.discount_percent - dec!(23.58)).abs() < dec!(0.01));
}

#[test]
fn test_bad_schedule_fails_whole_batch_with_index() {
    let good = cliff("op", dec!(10), date(2025, 6, 1));
    let bad = linear(
        "tia",
        dec!(10),
        date(2025, 6, 1),
        date(2025, 6, 1),
        Frequency::Monthly,
    );

    let err = value_portfolio(&[good, bad], midnight(2025, 1, 1), &ValuationConfig::default())
        .unwrap_err();
    match err {
        ValuationError::Schedule {
            index,
            token_id,
            source,
        } => {
            assert_eq!(index, 1);
            assert_eq!(token_id, "tia");
            assert!(matches!(
                source,
                ScheduleError::InvalidSchedule {
                    field: "endDate",
                    ..
                }
            ));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_mixed_portfolio_conserves_amounts() {
    let now = midnight(2025, 4, 15);
    let specs = vec![
        cliff("eth", dec!(500), date(2025, 1, 1)),
        cliff("eth", dec!(250), date(2025, 9, 1)),
        linear(
            "op",
            dec!(1000),
            date(2025, 1, 31),
            date(2025, 12, 31),
            Frequency::Monthly,
        ),
        linear(
            "op",
            dec!(333),
            date(2025, 1, 1),
            date(2025, 3, 31),
            Frequency::Cron {
                expression: "0 0 1 * *".to_string(),
            },
        ),
    ];
    let input_total: Decimal = specs.iter().map(|s| s.total_amount).sum();

    let valuation = value_portfolio(&specs, now, &ValuationConfig::default()).unwrap();
    let summary = &valuation.summary;

    assert_eq!(summary.total_amount, input_total);
    assert_eq!(
        summary.total_unlocked_amount + summary.total_locked_amount,
        summary.total_amount
    );
    assert_eq!(
        summary.total_unlocked_value + summary.total_locked_value,
        summary.total_value
    );

    let dates: Vec<NaiveDate> = valuation.events.iter().map(|p| p.event.date).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);

    let cumulative = summary.series(SeriesView::Cumulative);
    let last = cumulative.last().unwrap();
    assert_eq!(last.unlocked_amount + last.locked_amount, input_total);
    assert_eq!(last.value, summary.total_value);

    let by_token_total: Decimal = summary
        .by_token
        .values()
        .map(|t| t.unlocked_amount + t.locked_amount)
        .sum();
    assert_eq!(by_token_total, input_total);

    for priced in &valuation.events {
        assert_eq!(priced.unlocked, priced.event.date <= now.date_naive());
        if priced.unlocked {
            assert_eq!(priced.put_premium, Decimal::ZERO);
        } else {
            assert!(priced.discounted_price <= priced.event.pricing.spot);
        }
    }
}

#[test]
fn test_same_inputs_same_output() {
    let specs = vec![
        cliff("eth", dec!(500), date(2026, 1, 1)),
        linear(
            "op",
            dec!(700),
            date(2025, 1, 1),
            date(2025, 3, 1),
            Frequency::Weekly,
        ),
    ];
    let now = midnight(2025, 2, 1);
    let config = ValuationConfig::default();

    let first = value_portfolio(&specs, now, &config).unwrap();
    let second = value_portfolio(&specs, now, &config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_valuation_json_round_trip() {
    let specs = vec![cliff("eth", dec!(500), date(2026, 1, 1))];
    let valuation = value_portfolio(&specs, midnight(2025, 2, 1), &ValuationConfig::default()).unwrap();

    let json = serde_json::to_string(&valuation).unwrap();
    assert!(json.contains("\"putPremium\""));
    assert!(json.contains("\"tokenId\":\"eth\""));
    assert!(json.contains("\"evaluationInstant\""));

    let back: Valuation = serde_json::from_str(&json).unwrap();
    assert_eq!(back.summary, valuation.summary);
    assert_eq!(back.events[0].event, valuation.events[0].event);
    assert_eq!(back.events[0].put_premium, valuation.events[0].put_premium);
    assert!((back.events[0].time_to_expiry - valuation.events[0].time_to_expiry).abs() < 1e-12);
}

#[test]
fn test_base_unit_amount_overflow_is_reported() {
    let mut spec = cliff("pepe", dec!(10000000000000000000000000000), date(2026, 1, 1));
    spec.spot = dec!(100);
    spec.strike = dec!(100);

    let err = value_portfolio(&[spec], midnight(2025, 1, 1), &ValuationConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        ValuationError::Pricing(PricingError::Overflow { .. })
    ));
}

#[test]
fn test_weekday_cron_releases_on_mondays() {
    let spec = linear(
        "jto",
        dec!(500),
        date(2024, 7, 1),
        date(2024, 7, 31),
        Frequency::Cron {
            expression: "0 0 * * 1".to_string(),
        },
    );

    let valuation = value_portfolio(&[spec], midnight(2024, 6, 1), &ValuationConfig::default())
        .unwrap();
    assert_eq!(valuation.events.len(), 5);
    assert!(valuation
        .events
        .iter()
        .all(|p| p.event.date.weekday() == Weekday::Mon));
    assert!(valuation.events.iter().all(|p| p.event.amount == dec!(100)));
}
