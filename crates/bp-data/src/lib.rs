//! Ingestion and reporting pipeline for the blood-pressure log reporter.
//!
//! Responsible for recognising timestamped reading lines, accumulating
//! running statistics, tracking section boundaries and anomalies, reflowing
//! readings into columns and driving the whole session from raw lines to
//! printable report lines.

pub mod accumulator;
pub mod layout;
pub mod scanner;
pub mod session;
pub mod trackers;
