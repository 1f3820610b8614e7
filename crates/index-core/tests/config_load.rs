//! 설정 파일 로딩 통합 테스트

use chrono::NaiveDate;
use index_core::{AppConfig, UnlistedPolicy};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("임시 파일 생성 실패");
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_overrides_sections() {
    let file = write_config(
        r#"
[basket]
tickers = ["23760", "046210", "287840"]

[data]
manifest = "data/manifest.csv"
output_dir = "out"
analysis_start = "2025-01-01"

[calendar]
exchange_closures = false
extra_holidays = ["2025-01-27"]

[engine]
unlisted_policy = "flag"

[logging]
level = "debug"
format = "json"
span_events = true
"#,
    );

    let config = AppConfig::load(file.path()).expect("설정 로드 실패");

    assert_eq!(config.basket.tickers.len(), 3);
    assert!(config.basket.tickers.contains("023760"));
    assert_eq!(
        config.data.manifest.as_deref(),
        Some(std::path::Path::new("data/manifest.csv"))
    );
    assert_eq!(
        config.data.analysis_start,
        NaiveDate::from_ymd_opt(2025, 1, 1)
    );
    assert!(!config.calendar.exchange_closures);
    assert_eq!(
        config.calendar.extra_holidays,
        vec![NaiveDate::from_ymd_opt(2025, 1, 27).unwrap()]
    );
    assert_eq!(config.engine.unlisted_policy, UnlistedPolicy::Flag);
    assert_eq!(config.logging.format, "json");
    assert!(config.logging.span_events);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let file = write_config(
        r#"
[logging]
level = "warn"
"#,
    );

    let config = AppConfig::load(file.path()).expect("설정 로드 실패");

    assert_eq!(config.basket.tickers.len(), 53);
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.logging.format, "pretty");
    assert!(!config.logging.span_events);
    assert!(config.calendar.exchange_closures);
    assert!(config.data.long_table.is_none());
}

#[test]
fn test_missing_file_uses_defaults() {
    let config = AppConfig::load("does/not/exist.toml").expect("설정 로드 실패");
    assert_eq!(config.basket.tickers.len(), 53);
}
