//! CSV serialization of aggregated rows

use crate::app::models::AggregatedRow;
use crate::constants::OUTPUT_HEADERS;
use crate::{Error, Result};
use std::io::Write;
use tracing::debug;

/// Write rows as CSV, header first
///
/// The header row is always written, so an empty table still yields a
/// valid header-only CSV.
pub fn write_csv<W: Write>(writer: W, rows: &[AggregatedRow]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer
        .write_record(OUTPUT_HEADERS)
        .map_err(|e| Error::csv("Failed to write CSV header", e))?;

    for row in rows {
        csv_writer.serialize(row).map_err(|e| {
            Error::csv(
                format!("Failed to write row for {}", row.adjusted_time),
                e,
            )
        })?;
    }

    csv_writer
        .flush()
        .map_err(|e| Error::io("Failed to flush CSV output", e))?;

    debug!("Wrote {} CSV rows", rows.len());
    Ok(())
}

/// Render rows as a CSV string
pub fn to_csv_string(rows: &[AggregatedRow]) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, rows)?;
    String::from_utf8(buffer).map_err(|e| {
        Error::io(
            "CSV output was not valid UTF-8",
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        )
    })
}
