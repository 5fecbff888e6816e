//! Parser for geolocator logger text files
//!
//! Each logger file carries one kind of measurement (temperature, light,
//! wet counts, wet/dry transitions or wet-temperature summaries) as
//! tab-separated rows under a free-text header.
//!
//! ## Architecture
//!
//! - [`parser`] - Per-file parsing orchestration and timestamp adjustment
//! - [`header`] - Header metadata extraction and clock-drift correction
//! - [`field_parsers`] - Timestamp, drift and column helpers
//! - [`stats`] - Parsing statistics and result structures
//!
//! ## Usage
//!
//! ```rust,no_run
//! use geolocator_parser::app::services::discovery::classify_file;
//! use geolocator_parser::app::services::logger_file::LoggerFileParser;
//! use geolocator_parser::ParserConfig;
//!
//! # fn example() -> geolocator_parser::Result<()> {
//! let data_file = classify_file("data/bird-17/A123_000.lux".as_ref())?;
//!
//! let parser = LoggerFileParser::new(&ParserConfig::default())?;
//! let result = parser.parse_file(&data_file)?;
//! println!("Parsed {} records", result.stats.records_parsed);
//! # Ok(())
//! # }
//! ```

pub mod field_parsers;
pub mod header;
pub mod parser;
pub mod stats;

#[cfg(test)]
mod tests;

pub use header::{ClockCorrection, LoggerHeader};
pub use parser::LoggerFileParser;
pub use stats::{ParseResult, ParseStats};
