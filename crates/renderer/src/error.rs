//! Error types for rendering.

use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid color '{0}'")]
    InvalidColor(String),

    #[error("Invalid color scale: {0}")]
    InvalidScale(String),

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("Failed to allocate {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },

    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
