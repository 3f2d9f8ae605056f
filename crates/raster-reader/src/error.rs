//! Error types for raster reading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for raster reader operations.
pub type RasterResult<T> = Result<T, RasterError>;

/// Error types for raster reading.
#[derive(Error, Debug)]
pub enum RasterError {
    /// File could not be opened
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File opened but its content is not a usable single-band raster
    #[error("Unreadable raster '{path}': {reason}")]
    UnreadableRaster { path: PathBuf, reason: String },
}

impl RasterError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        RasterError::UnreadableRaster {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Path of the raster that failed.
    pub fn path(&self) -> &std::path::Path {
        match self {
            RasterError::Io { path, .. } | RasterError::UnreadableRaster { path, .. } => path,
        }
    }
}
