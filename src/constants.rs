//! Application constants for the geolocator parser
//!
//! This module contains file patterns, header markers, column labels and
//! output layout shared across the parsing pipeline.

// =============================================================================
// File Discovery
// =============================================================================

/// Logger file extensions, in the order they are discovered and merged
pub const LOGGER_FILE_EXTENSIONS: &[&str] = &["deg", "lux", "sst"];

/// Filename fragment marking vendor drift-adjusted duplicates
pub const DRIFT_ADJUSTED_MARKER: &str = "driftadj";

// =============================================================================
// Logger File Format
// =============================================================================

/// Timestamp format used inside logger files
pub const LOGGER_TIME_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Data header line: timestamp placeholder followed by the column labels
pub const DATA_HEADER_PATTERN: &str = r"^DD/MM/YYYY HH:MM:SS\t(.*?)(\t(.*?))?$";

/// Logger programming time, i.e. the start of logging
pub const PROGRAMMED_PATTERN: &str = r"^Programmed: (.*?)\.";

/// End of logging time
pub const END_OF_LOGGING_PATTERN: &str = r"^End of logging \(DD/MM/YYYY HH:MM:SS\): (.*?)$";

/// Total clock drift measured at download
pub const DRIFT_PATTERN: &str = r"^Drift \(secs\): (.*?)\.";

/// Data row field delimiter
pub const FIELD_DELIMITER: char = '\t';

/// Column labels of the data header, per record type
pub mod column_labels {
    pub const TEMPERATURE: &str = "T('C)";
    pub const LIGHT: &str = "light(lux)";
    pub const WETS: &str = "wets0-50";
    pub const WET_TEMPERATURE: &str = "wet min('C)";
    pub const WET_DRY: &str = "wet/dry";
    pub const DURATION: &str = "duration";
}

// =============================================================================
// Defaults
// =============================================================================

/// Hours between UTC and the deployment site's local time
pub const DEFAULT_TIMEZONE_OFFSET_HOURS: i64 = 4;

/// Largest timezone offset accepted, in hours either side of UTC
pub const MAX_TIMEZONE_OFFSET_HOURS: i64 = 24;

// =============================================================================
// CSV Output
// =============================================================================

/// Timestamp format used in the CSV output
pub const OUTPUT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// CSV header row, in column order
pub const OUTPUT_HEADERS: &[&str] = &[
    "Adjusted UTC Time",
    "Adjusted Local Time",
    "Original UTC Time",
    "Temp",
    "Light",
    "Wets",
    "Wet/Dry",
    "Duration",
    "Wet Temp (min)",
    "Wet Temp (max)",
    "Wet Temp (mean)",
    "Wet Temp (samples)",
];
