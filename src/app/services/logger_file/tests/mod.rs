//! Test utilities for logger file parser testing
//!
//! Builders for logger file content in the layout the loggers write.

use crate::app::models::{DataFile, RecordType};
use crate::app::services::logger_file::LoggerHeader;
use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;

mod parser_tests;

/// Standard metadata preamble with no drift line
pub fn preamble() -> String {
    [
        "Intigeo logger download",
        "Programmed: 01/10/2022 00:00:00. Logging started.",
        "End of logging (DD/MM/YYYY HH:MM:SS): 11/10/2022 00:00:00",
    ]
    .join("\n")
}

/// Preamble with a drift line spread over a 10 day logging period
pub fn preamble_with_drift(drift_secs: i64) -> String {
    format!(
        "{}\nDrift (secs): {}. Clock was adjusted.",
        preamble(),
        drift_secs
    )
}

/// Assemble a logger file from a preamble, a column header and data rows
pub fn logger_content(preamble: &str, columns: &[&str], rows: &[&str]) -> String {
    let mut content = String::new();
    content.push_str(preamble);
    content.push('\n');
    content.push_str("DD/MM/YYYY HH:MM:SS");
    for column in columns {
        content.push('\t');
        content.push_str(column);
    }
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    content
}

/// Classify content into a `DataFile` for direct parser calls
pub fn data_file(name: &str, content: String) -> DataFile {
    let path = PathBuf::from(name);
    let header = LoggerHeader::parse(&path, &content).unwrap();
    DataFile {
        path,
        header,
        content,
    }
}

/// Build a timestamp on the given October 2022 day
pub fn oct(day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 10, day)
        .unwrap()
        .and_hms_opt(hour, min, sec)
        .unwrap()
}
