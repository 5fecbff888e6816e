//! Command-line argument definitions for the logger parser
//!
//! Defines the CLI interface using the clap derive API.

use crate::config::ParserConfig;
use crate::constants::DEFAULT_TIMEZONE_OFFSET_HOURS;
use crate::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the geolocator logger parser
///
/// Parses the logger files in one animal's data directory and writes a
/// merged, time-ordered CSV table.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "parse-logger",
    version,
    about = "Merge geolocator logger files for one animal into a single CSV",
    long_about = "Reads the .deg, .lux and .sst files written by a wildlife-tracking geolocator \
                  from one animal's data directory, corrects timestamps for logger clock drift, \
                  merges the measurements by timestamp and writes the result as CSV. \
                  Run it once per animal directory and redirect standard output to a file."
)]
pub struct Args {
    /// Path to one animal's data directory
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,

    /// Write CSV to this file instead of standard output
    ///
    /// The file is only created once the whole directory has parsed
    /// successfully.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Write CSV to a file instead of standard output"
    )]
    pub output_path: Option<PathBuf>,

    /// Hours between UTC and local time at the deployment site
    ///
    /// Subtracted from the drift-adjusted UTC time to produce the
    /// "Adjusted Local Time" column.
    #[arg(
        long = "timezone-offset",
        value_name = "HOURS",
        env = "PARSE_LOGGER_TZ_OFFSET",
        default_value_t = DEFAULT_TIMEZONE_OFFSET_HOURS,
        allow_negative_numbers = true,
        help = "Hours subtracted from adjusted UTC time for local time"
    )]
    pub timezone_offset: i64,

    /// Fail when the directory contains no logger files
    ///
    /// By default an empty directory produces a header-only CSV.
    #[arg(
        long = "require-files",
        help = "Fail when the directory contains no logger files"
    )]
    pub require_files: bool,

    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.directory.is_dir() {
            return Err(Error::directory_not_found(&self.directory));
        }

        if let Some(output_path) = &self.output_path {
            if output_path.is_dir() {
                return Err(Error::configuration(format!(
                    "Output path is a directory: {}",
                    output_path.display()
                )));
            }
        }

        Ok(())
    }

    /// Build the parser configuration from defaults and argument overrides
    pub fn parser_config(&self) -> Result<ParserConfig> {
        let config = ParserConfig::default()
            .with_timezone_offset_hours(self.timezone_offset)
            .with_require_recognized_files(self.require_files);

        config.validate()?;
        Ok(config)
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
