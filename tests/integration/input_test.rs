//! Portfolio input file tests

use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use std::io::Write;
use tempfile::NamedTempFile;
use vesting_dlom::cli::load_portfolio;
use vesting_dlom::schedule::{Frequency, ScheduleKind};

#[test]
fn test_load_portfolio_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "evaluationInstant": "2025-01-01T00:00:00Z",
            "schedules": [
                {{
                    "kind": "linear",
                    "totalAmount": 1200,
                    "startDate": "2025-01-15",
                    "endDate": "2025-12-15",
                    "frequency": {{ "type": "monthly" }},
                    "spot": "1.25",
                    "strike": "1.25",
                    "volatility": 0.75,
                    "riskFreeRate": 0.04,
                    "tokenId": "strk"
                }},
                {{
                    "kind": "linear",
                    "totalAmount": 90,
                    "startDate": "2025-01-01",
                    "endDate": "2025-03-31",
                    "frequency": {{ "type": "daily" }},
                    "spot": 3,
                    "strike": 3,
                    "volatility": 0.5,
                    "tokenId": "jup"
                }}
            ]
        }}"#
    )
    .unwrap();

    let portfolio = load_portfolio(file.path()).unwrap();
    assert_eq!(
        portfolio.evaluation_instant,
        Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
    );
    assert_eq!(portfolio.schedules.len(), 2);

    let first = &portfolio.schedules[0];
    assert_eq!(first.kind, ScheduleKind::Linear);
    assert_eq!(first.frequency, Some(Frequency::Monthly));
    assert_eq!(first.spot, dec!(1.25));
    assert_eq!(first.risk_free_rate, Some(dec!(0.04)));

    let second = &portfolio.schedules[1];
    assert_eq!(second.frequency, Some(Frequency::Daily { interval_days: 1 }));
    assert_eq!(second.risk_free_rate, None);
}

#[test]
fn test_load_missing_file() {
    assert!(load_portfolio("/nonexistent/schedules.json").is_err());
}

#[test]
fn test_unknown_kind_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"kind": "streaming", "totalAmount": 1, "startDate": "2025-01-01",
            "spot": 1, "strike": 1, "volatility": 0.5, "tokenId": "x"}}]"#
    )
    .unwrap();
    assert!(load_portfolio(file.path()).is_err());
}
