//! Core logger file parser implementation
//!
//! This module handles data row splitting and the timestamp adjustments
//! that turn raw logger rows into records.

use chrono::{Duration, NaiveDateTime};
use std::path::Path;
use tracing::{debug, info};

use super::field_parsers::{get_required_field, parse_logger_time};
use super::header::ClockCorrection;
use super::stats::{ParseResult, ParseStats};
use crate::app::models::{DataFile, Measurement, Record, RecordType};
use crate::config::ParserConfig;
use crate::constants::{DEFAULT_TIMEZONE_OFFSET_HOURS, FIELD_DELIMITER};
use crate::{Error, Result};

/// Parser for geolocator logger text files
#[derive(Debug, Clone)]
pub struct LoggerFileParser {
    timezone_offset: Duration,
}

impl Default for LoggerFileParser {
    fn default() -> Self {
        Self {
            timezone_offset: Duration::hours(DEFAULT_TIMEZONE_OFFSET_HOURS),
        }
    }
}

impl LoggerFileParser {
    /// Create a new parser from the parse configuration
    ///
    /// Fails with a configuration error when the timezone offset is out of
    /// range.
    pub fn new(config: &ParserConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            timezone_offset: Duration::seconds(config.timezone_offset_seconds()),
        })
    }

    /// Parse a logger file and return its records with statistics
    ///
    /// Uses the header already read when the file was classified.
    pub fn parse_file(&self, data_file: &DataFile) -> Result<ParseResult> {
        info!(
            "Parsing {} file: {}",
            data_file.record_type(),
            data_file.path.display()
        );

        let path = data_file.path.as_path();
        let header = &data_file.header;
        let correction = header.clock_correction(path)?;

        let mut stats = ParseStats {
            drift_corrected: correction.is_some(),
            ..ParseStats::new()
        };
        let mut records = Vec::new();

        if let Some(correction) = &correction {
            debug!(
                "Drift correction for {}: {:.9} s/s from {}",
                path.display(),
                correction.drift_per_second,
                correction.start
            );
        }

        for (index, raw_line) in data_file
            .content
            .lines()
            .enumerate()
            .skip(header.data_start_line)
        {
            stats.total_rows += 1;

            let fields: Vec<&str> = raw_line.trim().split(FIELD_DELIMITER).collect();
            if fields[0].trim().is_empty() {
                stats.blank_rows += 1;
                continue;
            }

            let Some(original_time) = parse_logger_time(fields[0]) else {
                stats.invalid_timestamps += 1;
                debug!(
                    "Skipped line {} of {}: unparseable time '{}'",
                    index + 1,
                    path.display(),
                    fields[0]
                );
                continue;
            };

            let measurement = parse_measurement(&fields, header.record_type, path, index + 1)?;
            records.push(self.build_record(
                original_time,
                correction.as_ref(),
                measurement,
                path,
                index + 1,
            )?);
            stats.records_parsed += 1;
        }

        info!(
            "Parsed {} records from {} rows",
            stats.records_parsed, stats.total_rows
        );

        Ok(ParseResult {
            record_type: header.record_type,
            records,
            stats,
        })
    }

    /// Apply drift correction and the local offset to a raw timestamp
    ///
    /// A correction that pushes the time out of the representable range
    /// means the header's drift is corrupt.
    fn build_record(
        &self,
        original_time: NaiveDateTime,
        correction: Option<&ClockCorrection>,
        measurement: Measurement,
        path: &Path,
        line_number: usize,
    ) -> Result<Record> {
        let out_of_range = || {
            Error::malformed_file(
                path,
                format!(
                    "Line {}: adjusted time for {} is out of range",
                    line_number, original_time
                ),
            )
        };

        let adjusted_time = match correction {
            Some(correction) => correction.apply(original_time).ok_or_else(out_of_range)?,
            None => original_time,
        };
        let local_time = adjusted_time
            .checked_sub_signed(self.timezone_offset)
            .ok_or_else(out_of_range)?;

        Ok(Record {
            original_time,
            adjusted_time,
            local_time,
            measurement,
        })
    }
}

/// Extract the value columns of a data row for its record type
fn parse_measurement(
    fields: &[&str],
    record_type: RecordType,
    path: &Path,
    line_number: usize,
) -> Result<Measurement> {
    let field = |index| {
        get_required_field(fields, index, record_type, path, line_number).map(str::to_string)
    };

    let measurement = match record_type {
        RecordType::Temperature => Measurement::Temperature(field(1)?),
        RecordType::Light => Measurement::Light(field(1)?),
        RecordType::Wets => Measurement::Wets(field(1)?),
        RecordType::WetDry => Measurement::WetDry {
            duration: field(1)?,
            state: field(2)?,
        },
        RecordType::WetTemperature => Measurement::WetTemperature {
            min: field(1)?,
            max: field(2)?,
            mean: field(3)?,
            samples: field(4)?,
        },
    };

    Ok(measurement)
}
