use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the bp-report crates.
#[derive(Error, Debug)]
pub enum BpError {
    /// The input log file could not be opened or read.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A systolic/diastolic pair escaped every classification rule.
    ///
    /// The five AHA rules are exhaustive over non-negative pairs, so seeing
    /// this means the rule set itself has been broken.
    #[error("classification fault: {systolic}/{diastolic} matched no severity band")]
    ClassificationFault { systolic: u32, diastolic: u32 },

    /// An average was requested over zero readings.
    #[error("average requested over zero readings")]
    EmptyAverage,

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the bp-report crates.
pub type Result<T> = std::result::Result<T, BpError>;
