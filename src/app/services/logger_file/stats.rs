//! Parsing statistics and result structures for logger files

use crate::app::models::{Record, RecordType};

/// Parsing result with records and basic statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Record type declared by the file's data header
    pub record_type: RecordType,

    /// Successfully parsed records, in file order
    pub records: Vec<Record>,

    /// Basic parsing statistics
    pub stats: ParseStats,
}

/// Simple parsing statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Number of lines in the data section
    pub total_rows: usize,

    /// Number of records successfully parsed
    pub records_parsed: usize,

    /// Lines skipped for a blank first field
    pub blank_rows: usize,

    /// Lines skipped because their timestamp did not parse
    pub invalid_timestamps: usize,

    /// Whether clock-drift correction was applied
    pub drift_corrected: bool,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of data lines that produced no record
    pub fn rows_skipped(&self) -> usize {
        self.blank_rows + self.invalid_timestamps
    }
}
