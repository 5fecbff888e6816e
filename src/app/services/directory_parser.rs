//! Directory-level parsing for one animal's logger output
//!
//! Runs the full pipeline for a directory: discover, classify, parse each
//! file, merge by timestamp, back-fill and order.

use crate::app::models::AggregatedRow;
use crate::app::services::aggregator::RecordAggregator;
use crate::app::services::discovery::{FileDiscovery, classify_file};
use crate::app::services::logger_file::LoggerFileParser;
use crate::config::ParserConfig;
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// Summary of a directory parse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySummary {
    /// Logger files parsed
    pub files_parsed: usize,

    /// Files present but not recognized as logger files
    pub files_skipped: usize,

    /// Records merged across all files
    pub records_merged: usize,

    /// Data lines skipped for blank or unparseable timestamps
    pub rows_skipped: usize,

    /// Output rows produced
    pub rows_produced: usize,
}

/// Parser for a single animal's logger directory
#[derive(Debug, Clone)]
pub struct LoggerDirectoryParser {
    config: ParserConfig,
    file_parser: LoggerFileParser,
}

impl Default for LoggerDirectoryParser {
    fn default() -> Self {
        Self {
            config: ParserConfig::default(),
            file_parser: LoggerFileParser::default(),
        }
    }
}

impl LoggerDirectoryParser {
    /// Create a parser with the given configuration
    ///
    /// The configuration is validated here, so library callers get the same
    /// range checks as the command line.
    pub fn new(config: ParserConfig) -> Result<Self> {
        let file_parser = LoggerFileParser::new(&config)?;
        Ok(Self {
            config,
            file_parser,
        })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a directory into ascending, timestamp-unique rows
    pub fn parse(&self, directory: &Path) -> Result<Vec<AggregatedRow>> {
        self.parse_with_summary(directory).map(|(rows, _)| rows)
    }

    /// Parse a directory and report what was read
    ///
    /// Stops at the first malformed file; nothing is returned for the
    /// directory in that case.
    pub fn parse_with_summary(
        &self,
        directory: &Path,
    ) -> Result<(Vec<AggregatedRow>, DirectorySummary)> {
        let mut discovery = FileDiscovery::new(directory);
        let files = discovery.discover_logger_files()?;

        let mut summary = DirectorySummary {
            files_skipped: discovery.skipped_files().len(),
            ..Default::default()
        };

        if files.is_empty() {
            if self.config.require_recognized_files {
                return Err(Error::no_recognized_files(directory));
            }
            info!("No logger files found in {}", directory.display());
        }

        let mut aggregator = RecordAggregator::new();

        for path in &files {
            let data_file = classify_file(path)?;
            let result = self.file_parser.parse_file(&data_file)?;

            debug!(
                "{}: {} records, {} rows skipped",
                path.display(),
                result.stats.records_parsed,
                result.stats.rows_skipped()
            );

            summary.files_parsed += 1;
            summary.rows_skipped += result.stats.rows_skipped();
            aggregator.add_records(result.records);
        }

        summary.records_merged = aggregator.records_merged();
        let rows = aggregator.finish();
        summary.rows_produced = rows.len();

        info!(
            "Parsed {} files from {} into {} rows",
            summary.files_parsed,
            directory.display(),
            summary.rows_produced
        );

        Ok((rows, summary))
    }
}
