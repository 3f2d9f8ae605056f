//! Error taxonomy for the animation pipeline.
//!
//! Every variant is terminal for the run: nothing is retried and no partial
//! animation is produced.

use std::path::PathBuf;

use chrono::NaiveDate;
use raster_reader::RasterError;
use renderer::RenderError;
use thiserror::Error;

/// Result type for animation operations.
pub type AnimationResult<T> = Result<T, AnimationError>;

#[derive(Error, Debug)]
pub enum AnimationError {
    /// Name looks like a frame but its date is not a calendar date
    #[error("Malformed frame filename '{file}': {reason}")]
    MalformedFilename { file: String, reason: String },

    #[error("No frames to animate")]
    EmptyFrameSet,

    #[error("No valid pixels in {frames} frame(s)")]
    NoValidPixels { frames: usize },

    #[error("Failed to render frame {date}: {reason}")]
    RenderFailure { date: NaiveDate, reason: String },

    #[error("Invalid frame rate {0}: must be a positive number")]
    InvalidFrameRate(f64),

    #[error("Animation encoding failed: {0}")]
    EncodingFailure(String),

    #[error(transparent)]
    UnreadableRaster(#[from] RasterError),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot determine a date for '{0}'")]
    MissingDate(PathBuf),

    #[error("Invalid render configuration: {0}")]
    RenderConfig(#[source] RenderError),
}

impl AnimationError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnimationError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn render_failure(date: NaiveDate, reason: impl ToString) -> Self {
        AnimationError::RenderFailure {
            date,
            reason: reason.to_string(),
        }
    }
}
