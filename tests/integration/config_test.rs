//! Configuration loading tests

use rust_decimal_macros::dec;
use std::io::Write;
use tempfile::NamedTempFile;
use vesting_dlom::config::{Config, OutputFormat};
use vesting_dlom::valuation::SeriesView;

#[test]
fn test_load_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        [valuation]
        risk_free_rate = 0.045

        [output]
        format = "json"
        "#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.valuation.risk_free_rate, dec!(0.045));
    assert_eq!(config.output.format, OutputFormat::Json);
    assert_eq!(config.output.view, SeriesView::Cumulative);
    assert_eq!(config.telemetry.log_level, "info");
}

#[test]
fn test_load_rejects_negative_rate() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[valuation]\nrisk_free_rate = -0.5").unwrap();
    assert!(Config::load(file.path()).is_err());
}

#[test]
fn test_load_optional_rejects_invalid_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[valuation]\nrisk_free_rate = -0.01").unwrap();
    assert!(Config::load_optional(file.path()).is_err());

    let mut typo = NamedTempFile::new().unwrap();
    writeln!(typo, "[output]\nformat = \"tabel\"").unwrap();
    assert!(Config::load_optional(typo.path()).is_err());
}

#[test]
fn test_load_optional_missing_file_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("config.toml");
    assert!(Config::load_optional(&missing).unwrap().is_none());
}

#[test]
fn test_load_rejects_malformed_toml() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[valuation\nrisk_free_rate = ").unwrap();
    assert!(Config::load(file.path()).is_err());
}
