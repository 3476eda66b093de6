use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use bp_core::error::{BpError, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised. All output
/// goes to stderr so the report on stdout stays clean.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Input acquisition ──────────────────────────────────────────────────────────

/// Open the input line source: the given file, or stdin when absent.
///
/// The returned handle is the only resource the run holds; dropping it on
/// any exit path releases the file.
pub fn open_input(infile: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    match infile {
        Some(path) => {
            let file = File::open(path).map_err(|source| BpError::FileRead {
                path: path.clone(),
                source,
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(std::io::stdin()))),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
