//! Field parsing utilities for logger files
//!
//! Helpers for parsing timestamps, drift values and tab-separated data
//! fields with file and line context attached to any error.

use crate::app::models::RecordType;
use crate::constants::LOGGER_TIME_FORMAT;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use std::path::Path;
use tracing::warn;

/// Parse a logger timestamp (`DD/MM/YYYY HH:MM:SS`)
pub fn parse_logger_time(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value.trim(), LOGGER_TIME_FORMAT).ok()
}

/// Parse a timestamp from a header metadata line, warning when it is unusable
pub fn parse_metadata_time(path: &Path, label: &str, value: &str) -> Option<NaiveDateTime> {
    let parsed = parse_logger_time(value);
    if parsed.is_none() {
        warn!(
            "Could not parse {} time '{}' in {}",
            label,
            value,
            path.display()
        );
    }
    parsed
}

/// Parse the whole-second drift value from a `Drift (secs):` line
pub fn parse_drift_seconds(path: &Path, value: &str) -> Result<i64> {
    value.trim().parse::<i64>().map_err(|e| {
        Error::malformed_file(
            path,
            format!("Invalid drift value '{}' ({})", value.trim(), e),
        )
    })
}

/// Get a required value column from a split data row
///
/// `index` counts from the timestamp column, so the first value is 1.
pub fn get_required_field<'a>(
    fields: &[&'a str],
    index: usize,
    record_type: RecordType,
    path: &Path,
    line_number: usize,
) -> Result<&'a str> {
    fields.get(index).map(|s| s.trim()).ok_or_else(|| {
        Error::malformed_file(
            path,
            format!(
                "Line {}: {} row has {} value column(s), expected {}",
                line_number,
                record_type,
                fields.len().saturating_sub(1),
                record_type.value_columns()
            ),
        )
    })
}
