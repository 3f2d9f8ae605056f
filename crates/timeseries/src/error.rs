//! Error types for time-series loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for time-series operations.
pub type TimeSeriesResult<T> = Result<T, TimeSeriesError>;

#[derive(Error, Debug)]
pub enum TimeSeriesError {
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {origin}: {source}")]
    InvalidJson {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected JSON shape in {origin}: {reason}")]
    InvalidShape { origin: String, reason: String },

    #[error("Unparseable timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    #[error("Time-series table is empty")]
    EmptyTable,
}
