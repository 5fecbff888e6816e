//! Tests for the logger file parser

use super::*;
use crate::Error;
use crate::app::models::Measurement;
use crate::app::services::logger_file::{LoggerFileParser, ParseStats};
use crate::config::ParserConfig;

fn parser() -> LoggerFileParser {
    LoggerFileParser::new(&ParserConfig::default()).unwrap()
}

#[test]
fn test_parse_temperature_file() {
    let content = logger_content(
        &preamble(),
        &["T('C)"],
        &[
            "06/10/2022 12:00:00\t21.5",
            "06/10/2022 12:05:00\t21.75",
        ],
    );
    let file = data_file("A123.deg", content);

    let result = parser().parse_file(&file).unwrap();

    assert_eq!(result.record_type, RecordType::Temperature);
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.stats.records_parsed, 2);
    assert!(!result.stats.drift_corrected);

    let first = &result.records[0];
    assert_eq!(first.original_time, oct(6, 12, 0, 0));
    assert_eq!(first.adjusted_time, oct(6, 12, 0, 0));
    assert_eq!(first.local_time, oct(6, 8, 0, 0));
    assert_eq!(first.measurement, Measurement::Temperature("21.5".to_string()));
}

#[test]
fn test_parse_wet_dry_file_column_order() {
    let content = logger_content(
        &preamble(),
        &["wet/dry", "duration"],
        &["06/10/2022 12:00:00\t600\twet"],
    );
    let file = data_file("A123.sst", content);

    let result = parser().parse_file(&file).unwrap();

    assert_eq!(
        result.records[0].measurement,
        Measurement::WetDry {
            duration: "600".to_string(),
            state: "wet".to_string(),
        }
    );
}

#[test]
fn test_parse_wet_temperature_file() {
    let content = logger_content(
        &preamble(),
        &["wet min('C)", "wet max('C)", "wet mean('C)", "samples"],
        &["06/10/2022 00:00:00\t17.9\t19.1\t18.4\t144"],
    );
    let file = data_file("A123.deg", content);

    let result = parser().parse_file(&file).unwrap();

    assert_eq!(
        result.records[0].measurement,
        Measurement::WetTemperature {
            min: "17.9".to_string(),
            max: "19.1".to_string(),
            mean: "18.4".to_string(),
            samples: "144".to_string(),
        }
    );
}

#[test]
fn test_blank_and_invalid_rows_are_skipped() {
    let content = logger_content(
        &preamble(),
        &["light(lux)"],
        &[
            "",
            "06/10/2022 12:00:00\t1200",
            "not a time\t5",
            "   ",
            "06/10/2022 12:10:00\t1100",
        ],
    );
    let file = data_file("A123.lux", content);

    let result = parser().parse_file(&file).unwrap();

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.stats.total_rows, 5);
    assert_eq!(result.stats.blank_rows, 2);
    assert_eq!(result.stats.invalid_timestamps, 1);
    assert_eq!(result.stats.rows_skipped(), 3);
}

#[test]
fn test_short_row_is_malformed() {
    let content = logger_content(
        &preamble(),
        &["wet min('C)", "wet max('C)", "wet mean('C)", "samples"],
        &["06/10/2022 00:00:00\t17.9\t19.1"],
    );
    let file = data_file("A123.deg", content);

    let err = parser().parse_file(&file).unwrap_err();

    match err {
        Error::MalformedFile { path, message } => {
            assert_eq!(path.to_string_lossy(), "A123.deg");
            // preamble (3) + data header (1) + first data row
            assert!(message.contains("Line 5"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_drift_correction_applied_to_rows() {
    let content = logger_content(
        &preamble_with_drift(864),
        &["light(lux)"],
        &["06/10/2022 00:00:00\t800"],
    );
    let file = data_file("A123.lux", content);

    let result = parser().parse_file(&file).unwrap();
    let record = &result.records[0];

    assert!(result.stats.drift_corrected);
    assert_eq!(record.original_time, oct(6, 0, 0, 0));
    assert_eq!(record.adjusted_time, oct(6, 0, 7, 12));
    assert_eq!(record.local_time, oct(5, 20, 7, 12));
}

#[test]
fn test_timezone_offset_from_config() {
    let content = logger_content(
        &preamble(),
        &["wets0-50"],
        &["06/10/2022 12:00:00\t50"],
    );
    let file = data_file("A123.sst", content);
    let parser =
        LoggerFileParser::new(&ParserConfig::new().with_timezone_offset_hours(-2)).unwrap();

    let result = parser.parse_file(&file).unwrap();

    assert_eq!(result.records[0].local_time, oct(6, 14, 0, 0));
}

#[test]
fn test_header_only_file_has_no_records() {
    let content = logger_content(&preamble(), &["T('C)"], &[]);
    let file = data_file("A123.deg", content);

    let result = parser().parse_file(&file).unwrap();

    assert!(result.records.is_empty());
    assert_eq!(result.stats, ParseStats::default());
}

#[test]
fn test_drift_overflow_is_malformed() {
    let content = logger_content(
        "Programmed: 01/10/2022 00:00:00.\nEnd of logging (DD/MM/YYYY HH:MM:SS): 01/10/2022 00:00:01\nDrift (secs): 9000000000000000000.",
        &["light(lux)"],
        &["06/10/2022 00:00:00\t5"],
    );
    let file = data_file("A123.lux", content);

    let err = parser().parse_file(&file).unwrap_err();

    match err {
        Error::MalformedFile { message, .. } => {
            // preamble (3) + data header (1) + first data row
            assert!(message.contains("Line 5"), "{message}");
            assert!(message.contains("out of range"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_default_parser_uses_default_offset() {
    let content = logger_content(&preamble(), &["T('C)"], &["06/10/2022 12:00:00\t20"]);
    let file = data_file("A123.deg", content);

    let result = LoggerFileParser::default().parse_file(&file).unwrap();

    assert_eq!(result.records[0].local_time, oct(6, 8, 0, 0));
}

#[test]
fn test_new_rejects_out_of_range_offset() {
    let config = ParserConfig::new().with_timezone_offset_hours(i64::MAX);

    let err = LoggerFileParser::new(&config).unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }));
}
