//! Geolocator Parser Library
//!
//! A Rust library for turning the text files written by wildlife-tracking
//! geolocators into a single, time-ordered CSV table per animal.
//!
//! This library provides tools for:
//! - Discovering and classifying logger files in an animal's data directory
//! - Parsing logger headers and applying linear clock-drift correction
//! - Merging temperature, light and wet/dry records by timestamp
//! - Back-filling wet/dry state and wet-temperature summaries
//! - Writing the merged table as CSV

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod aggregator;
        pub mod csv_output;
        pub mod directory_parser;
        pub mod discovery;
        pub mod logger_file;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{AggregatedRow, DataFile, Measurement, Record, RecordType};
pub use app::services::directory_parser::LoggerDirectoryParser;
pub use config::ParserConfig;

use std::path::{Path, PathBuf};

/// Result type alias for the geolocator parser
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for logger parsing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Input path is missing or is not a directory
    #[error("Directory not found: {}", .path.display())]
    DirectoryNotFound { path: PathBuf },

    /// A recognized logger file does not match its expected structure
    #[error("Malformed logger file '{}': {message}", .path.display())]
    MalformedFile { path: PathBuf, message: String },

    /// The directory held no logger files at all
    #[error("No recognized logger files in {}", .path.display())]
    NoRecognizedFiles { path: PathBuf },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error
    #[error("CSV error: {message}")]
    Csv {
        message: String,
        #[source]
        source: csv::Error,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create a directory not found error
    pub fn directory_not_found(path: impl AsRef<Path>) -> Self {
        Self::DirectoryNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a malformed file error
    pub fn malformed_file(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::MalformedFile {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a no recognized files error
    pub fn no_recognized_files(path: impl AsRef<Path>) -> Self {
        Self::NoRecognizedFiles {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a CSV error with context
    pub fn csv(message: impl Into<String>, source: csv::Error) -> Self {
        Self::Csv {
            message: message.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::Csv {
            message: "CSV writing failed".to_string(),
            source: error,
        }
    }
}
