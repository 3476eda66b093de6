//! Core domain types for the blood-pressure log reporter.
//!
//! Holds the reading and severity-band models, the AHA classification rules,
//! report string formatting, the error type shared by all crates, and the CLI
//! settings layer.

pub mod classify;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{BpError, Result};
