//! File discovery for an animal's logger directory
//!
//! Lists the directory, keeps the logger files and classifies each one by
//! the data header inside it.

use crate::app::models::DataFile;
use crate::app::services::logger_file::LoggerHeader;
use crate::constants::{DRIFT_ADJUSTED_MARKER, LOGGER_FILE_EXTENSIONS};
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File discovery component for one logger directory
#[derive(Debug)]
pub struct FileDiscovery {
    directory: PathBuf,
    skipped_files: Vec<PathBuf>,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            skipped_files: Vec::new(),
        }
    }

    /// Files seen by the last discovery that were not logger files
    pub fn skipped_files(&self) -> &[PathBuf] {
        &self.skipped_files
    }

    /// Discover logger files in the directory
    ///
    /// Only the top level is listed. Files come back grouped by extension in
    /// `deg`, `lux`, `sst` order and sorted by path within each group.
    pub fn discover_logger_files(&mut self) -> Result<Vec<PathBuf>> {
        if !self.directory.is_dir() {
            return Err(Error::directory_not_found(&self.directory));
        }

        debug!("Searching for logger files in: {}", self.directory.display());

        self.skipped_files.clear();
        let mut files = Vec::new();

        let entries = fs::read_dir(&self.directory).map_err(|e| {
            Error::io(
                format!("Failed to read directory {}", self.directory.display()),
                e,
            )
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| {
                Error::io(
                    format!("Failed to read entry in {}", self.directory.display()),
                    e,
                )
            })?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            match extension_rank(&path) {
                Some(rank) if !is_drift_adjusted(&path) => files.push((rank, path)),
                _ => {
                    debug!("Skipping {}", path.display());
                    self.skipped_files.push(path);
                }
            }
        }

        files.sort();
        self.skipped_files.sort();

        debug!(
            "Found {} logger files, skipped {}",
            files.len(),
            self.skipped_files.len()
        );

        Ok(files.into_iter().map(|(_, path)| path).collect())
    }
}

/// Read a logger file and classify it by its data header
///
/// Bytes that are not UTF-8 text make the file malformed rather than an
/// I/O failure.
pub fn classify_file(path: &Path) -> Result<DataFile> {
    let bytes =
        fs::read(path).map_err(|e| Error::io(format!("Failed to read file {}", path.display()), e))?;

    let content = String::from_utf8(bytes).map_err(|e| {
        Error::malformed_file(
            path,
            format!("Not valid UTF-8 text at byte {}", e.utf8_error().valid_up_to()),
        )
    })?;

    let header = LoggerHeader::parse(path, &content)?;

    Ok(DataFile {
        path: path.to_path_buf(),
        header,
        content,
    })
}

/// Position of the file's extension in the discovery order, if it has one
fn extension_rank(path: &Path) -> Option<usize> {
    let extension = path.extension()?.to_str()?;
    LOGGER_FILE_EXTENSIONS
        .iter()
        .position(|known| *known == extension)
}

/// Check if a path is a vendor drift-adjusted copy
fn is_drift_adjusted(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().contains(DRIFT_ADJUSTED_MARKER))
}
