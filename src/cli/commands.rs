//! Command implementation for the logger parser CLI
//!
//! Sets up logging, parses the directory and writes the CSV to standard
//! output or the requested file.

use crate::app::services::csv_output::write_csv;
use crate::app::services::directory_parser::{DirectorySummary, LoggerDirectoryParser};
use crate::cli::args::Args;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter};
use std::time::Instant;
use tracing::{debug, info};

/// Main command runner
///
/// 1. Set up logging
/// 2. Validate arguments and build configuration
/// 3. Parse the whole directory
/// 4. Write the CSV only once parsing has succeeded
pub fn run(args: Args) -> Result<DirectorySummary> {
    let start_time = Instant::now();

    setup_logging(&args)?;
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = args.parser_config()?;
    debug!("Parser configuration: {:?}", config);

    let parser = LoggerDirectoryParser::new(config)?;
    let (rows, summary) = parser
        .parse_with_summary(&args.directory)
        .with_context(|| format!("Failed to parse {}", args.directory.display()))?;

    match &args.output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_csv(BufWriter::new(file), &rows)?;
            info!("Wrote {} rows to {}", rows.len(), path.display());
        }
        None => {
            write_csv(io::stdout().lock(), &rows)?;
        }
    }

    info!(
        "Finished in {:.2?}: {} files, {} records, {} rows ({} lines skipped)",
        start_time.elapsed(),
        summary.files_parsed,
        summary.records_merged,
        summary.rows_produced,
        summary.rows_skipped
    );

    Ok(summary)
}

/// Set up tracing to stderr so stdout carries only CSV
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("geolocator_parser={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(io::stderr)
                .compact(),
        )
        .try_init()
        .context("Failed to initialise logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}
