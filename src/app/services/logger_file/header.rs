//! Logger file header parsing and clock-drift correction
//!
//! A logger file opens with free-text metadata (programming time, end of
//! logging, measured drift) followed by a tab-separated data header that
//! names the measurement columns. Everything after the data header is data.

use crate::app::models::RecordType;
use crate::constants::{
    DATA_HEADER_PATTERN, DRIFT_PATTERN, END_OF_LOGGING_PATTERN, FIELD_DELIMITER,
    PROGRAMMED_PATTERN,
};
use crate::{Error, Result};
use chrono::{Duration, NaiveDateTime};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

use super::field_parsers::{parse_drift_seconds, parse_metadata_time};

/// Compiled header line patterns
struct HeaderPatterns {
    data_header: Regex,
    programmed: Regex,
    end_of_logging: Regex,
    drift: Regex,
}

static PATTERNS: LazyLock<HeaderPatterns> = LazyLock::new(|| HeaderPatterns {
    data_header: Regex::new(DATA_HEADER_PATTERN).expect("data header pattern is valid"),
    programmed: Regex::new(PROGRAMMED_PATTERN).expect("programmed pattern is valid"),
    end_of_logging: Regex::new(END_OF_LOGGING_PATTERN).expect("end of logging pattern is valid"),
    drift: Regex::new(DRIFT_PATTERN).expect("drift pattern is valid"),
});

/// Metadata extracted from the header section of a logger file
#[derive(Debug, Clone, PartialEq)]
pub struct LoggerHeader {
    /// Time the logger was programmed (start of logging)
    pub programmed: Option<NaiveDateTime>,

    /// Time logging stopped
    pub end_of_logging: Option<NaiveDateTime>,

    /// Clock drift measured at download, in whole seconds
    pub drift_seconds: Option<i64>,

    /// Record type named by the first data column
    pub record_type: RecordType,

    /// Column labels after the timestamp column
    pub column_labels: Vec<String>,

    /// Zero-based index of the first line after the data header
    pub data_start_line: usize,
}

impl LoggerHeader {
    /// Parse the header section of a logger file
    ///
    /// Fails when no data header line exists (truncated file) or when its
    /// first column label is not a known measurement.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let patterns = &*PATTERNS;

        let mut programmed = None;
        let mut end_of_logging = None;
        let mut drift_seconds = None;

        for (index, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();

            if let Some(caps) = patterns.data_header.captures(line) {
                let label = caps.get(1).map_or("", |m| m.as_str());
                let record_type = RecordType::from_column_label(label).ok_or_else(|| {
                    Error::malformed_file(
                        path,
                        format!("Line {}: unknown data column '{}'", index + 1, label),
                    )
                })?;

                let column_labels = line
                    .split(FIELD_DELIMITER)
                    .skip(1)
                    .map(|s| s.trim().to_string())
                    .collect();

                debug!(
                    "Data header for {} at line {}: {}",
                    path.display(),
                    index + 1,
                    record_type
                );

                return Ok(Self {
                    programmed,
                    end_of_logging,
                    drift_seconds,
                    record_type,
                    column_labels,
                    data_start_line: index + 1,
                });
            } else if let Some(caps) = patterns.programmed.captures(line) {
                programmed = parse_metadata_time(path, "programmed", &caps[1]);
            } else if let Some(caps) = patterns.end_of_logging.captures(line) {
                end_of_logging = parse_metadata_time(path, "end of logging", &caps[1]);
            } else if let Some(caps) = patterns.drift.captures(line) {
                drift_seconds = Some(parse_drift_seconds(path, &caps[1])?);
            }
        }

        Err(Error::malformed_file(path, "No data header line found"))
    }

    /// Build the clock correction described by this header
    ///
    /// Returns `None` when no drift was recorded. A non-zero drift needs a
    /// logging period to spread over, so a missing or empty period is an error.
    pub fn clock_correction(&self, path: &Path) -> Result<Option<ClockCorrection>> {
        let drift = match self.drift_seconds {
            None | Some(0) => return Ok(None),
            Some(drift) => drift,
        };

        let (start, end) = match (self.programmed, self.end_of_logging) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(Error::malformed_file(
                    path,
                    "Drift recorded without both programmed and end of logging times",
                ));
            }
        };

        let period = (end - start).num_seconds();
        if period <= 0 {
            return Err(Error::malformed_file(
                path,
                format!("End of logging {} is not after programmed time {}", end, start),
            ));
        }

        Ok(Some(ClockCorrection {
            start,
            drift_per_second: drift as f64 / period as f64,
        }))
    }
}

/// Linear clock-drift correction over a logging period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockCorrection {
    /// Start of logging; skew grows from zero here
    pub start: NaiveDateTime,

    /// Seconds of drift per elapsed second
    pub drift_per_second: f64,
}

impl ClockCorrection {
    /// Shift a logger timestamp by the drift accumulated since `start`
    ///
    /// Fractional seconds are floored, so the result never lands later than
    /// the exact adjusted instant. Returns `None` when the skew or the
    /// shifted time is out of range.
    pub fn apply(&self, time: NaiveDateTime) -> Option<NaiveDateTime> {
        let elapsed = (time - self.start).num_seconds() as f64;
        let skew = (self.drift_per_second * elapsed).floor();
        if !skew.is_finite() || skew.abs() >= i64::MAX as f64 {
            return None;
        }

        let skew = Duration::try_seconds(skew as i64)?;
        time.checked_add_signed(skew)
    }
}
