//! Configuration for logger directory parsing
//!
//! Settings are layered: built-in defaults, then environment variables and
//! command-line flags applied by the CLI.

use crate::constants::{DEFAULT_TIMEZONE_OFFSET_HOURS, MAX_TIMEZONE_OFFSET_HOURS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a single parse invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Hours subtracted from adjusted UTC time to get local time
    /// Default: 4
    pub timezone_offset_hours: i64,

    /// Fail when the directory holds no logger files instead of
    /// producing header-only output
    /// Default: false
    pub require_recognized_files: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            timezone_offset_hours: DEFAULT_TIMEZONE_OFFSET_HOURS,
            require_recognized_files: false,
        }
    }
}

impl ParserConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timezone offset in hours
    pub fn with_timezone_offset_hours(mut self, hours: i64) -> Self {
        self.timezone_offset_hours = hours;
        self
    }

    /// Require at least one logger file in the directory
    pub fn with_require_recognized_files(mut self, required: bool) -> Self {
        self.require_recognized_files = required;
        self
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        let range = -MAX_TIMEZONE_OFFSET_HOURS..=MAX_TIMEZONE_OFFSET_HOURS;
        if !range.contains(&self.timezone_offset_hours) {
            return Err(Error::configuration(format!(
                "Timezone offset must be within +/-{} hours, got {}",
                MAX_TIMEZONE_OFFSET_HOURS, self.timezone_offset_hours
            )));
        }

        Ok(())
    }

    /// Timezone offset in seconds
    pub fn timezone_offset_seconds(&self) -> i64 {
        self.timezone_offset_hours * 3600
    }
}
