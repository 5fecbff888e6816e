//! Data models for geolocator logger processing
//!
//! This module contains the record types a logger writes, the parsed records
//! themselves, and the merged row emitted for each adjusted timestamp.

use crate::app::services::logger_file::LoggerHeader;
use crate::constants::{OUTPUT_TIME_FORMAT, column_labels};
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

// =============================================================================
// Record Types
// =============================================================================

/// Kind of measurement held in a logger file
///
/// The type is inferred from the first column label of the file's data
/// header, not from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// Temperature in degrees Celsius
    Temperature,
    /// Light level in lux
    Light,
    /// Wet sample count (0-50) per interval
    Wets,
    /// Wet/dry transition with its duration
    WetDry,
    /// Water temperature summary while wet
    WetTemperature,
}

impl RecordType {
    /// Map a data header column label to its record type
    pub fn from_column_label(label: &str) -> Option<Self> {
        match label.trim() {
            column_labels::TEMPERATURE => Some(RecordType::Temperature),
            column_labels::LIGHT => Some(RecordType::Light),
            column_labels::WETS => Some(RecordType::Wets),
            column_labels::WET_TEMPERATURE => Some(RecordType::WetTemperature),
            column_labels::WET_DRY | column_labels::DURATION => Some(RecordType::WetDry),
            _ => None,
        }
    }

    /// Number of value columns following the timestamp in each data row
    pub fn value_columns(&self) -> usize {
        match self {
            RecordType::Temperature | RecordType::Light | RecordType::Wets => 1,
            RecordType::WetDry => 2,
            RecordType::WetTemperature => 4,
        }
    }

    /// Short lowercase name for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::Temperature => "temperature",
            RecordType::Light => "light",
            RecordType::Wets => "wets",
            RecordType::WetDry => "wet-dry",
            RecordType::WetTemperature => "wet-temperature",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Files and Records
// =============================================================================

/// One logger file read from an animal's directory
#[derive(Debug, Clone)]
pub struct DataFile {
    pub path: PathBuf,

    /// Header parsed when the file was classified
    pub header: LoggerHeader,

    pub content: String,
}

impl DataFile {
    /// Record type named by the file's data header
    pub fn record_type(&self) -> RecordType {
        self.header.record_type
    }
}

/// Measured values carried by a single record, as written by the logger
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Measurement {
    Temperature(String),
    Light(String),
    Wets(String),
    WetDry {
        duration: String,
        state: String,
    },
    WetTemperature {
        min: String,
        max: String,
        mean: String,
        samples: String,
    },
}

/// One measurement entry parsed from a logger file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Timestamp exactly as the logger wrote it
    pub original_time: NaiveDateTime,

    /// Timestamp after clock-drift correction; the merge key
    pub adjusted_time: NaiveDateTime,

    /// Adjusted timestamp shifted to the deployment site's local time
    pub local_time: NaiveDateTime,

    pub measurement: Measurement,
}

// =============================================================================
// Aggregated Output
// =============================================================================

/// One merged output row for a single adjusted timestamp
///
/// Field order matches the CSV column order; absent values serialize as
/// empty fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregatedRow {
    #[serde(rename = "Adjusted UTC Time", serialize_with = "serialize_time")]
    pub adjusted_time: NaiveDateTime,

    #[serde(rename = "Adjusted Local Time", serialize_with = "serialize_time")]
    pub local_time: NaiveDateTime,

    #[serde(rename = "Original UTC Time", serialize_with = "serialize_time")]
    pub original_time: NaiveDateTime,

    #[serde(rename = "Temp")]
    pub temperature: Option<String>,

    #[serde(rename = "Light")]
    pub light: Option<String>,

    #[serde(rename = "Wets")]
    pub wets: Option<String>,

    #[serde(rename = "Wet/Dry")]
    pub wet_dry: Option<String>,

    #[serde(rename = "Duration")]
    pub duration: Option<String>,

    #[serde(rename = "Wet Temp (min)")]
    pub wet_temp_min: Option<String>,

    #[serde(rename = "Wet Temp (max)")]
    pub wet_temp_max: Option<String>,

    #[serde(rename = "Wet Temp (mean)")]
    pub wet_temp_mean: Option<String>,

    #[serde(rename = "Wet Temp (samples)")]
    pub wet_temp_samples: Option<String>,
}

impl AggregatedRow {
    /// Start a row from the first record seen at its adjusted timestamp
    pub fn from_record(record: &Record) -> Self {
        let mut row = Self {
            adjusted_time: record.adjusted_time,
            local_time: record.local_time,
            original_time: record.original_time,
            temperature: None,
            light: None,
            wets: None,
            wet_dry: None,
            duration: None,
            wet_temp_min: None,
            wet_temp_max: None,
            wet_temp_mean: None,
            wet_temp_samples: None,
        };
        row.absorb(record);
        row
    }

    /// Merge a record into this row
    ///
    /// The record's fields overwrite any held by the row, and its original
    /// and local timestamps replace the row's. Fields the record does not
    /// carry are left untouched.
    pub fn absorb(&mut self, record: &Record) {
        self.original_time = record.original_time;
        self.local_time = record.local_time;

        match &record.measurement {
            Measurement::Temperature(value) => self.temperature = Some(value.clone()),
            Measurement::Light(value) => self.light = Some(value.clone()),
            Measurement::Wets(value) => self.wets = Some(value.clone()),
            Measurement::WetDry { duration, state } => {
                self.duration = Some(duration.clone());
                self.wet_dry = Some(state.clone());
            }
            Measurement::WetTemperature {
                min,
                max,
                mean,
                samples,
            } => {
                self.wet_temp_min = Some(min.clone());
                self.wet_temp_max = Some(max.clone());
                self.wet_temp_mean = Some(mean.clone());
                self.wet_temp_samples = Some(samples.clone());
            }
        }
    }

    /// Whether the row carries a wet-temperature summary
    pub fn has_wet_temperature(&self) -> bool {
        self.wet_temp_min.is_some()
    }
}

fn serialize_time<S>(time: &NaiveDateTime, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&time.format(OUTPUT_TIME_FORMAT))
}
