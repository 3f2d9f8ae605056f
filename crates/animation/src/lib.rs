//! Space-time NO2 animation from dated rasters.
//!
//! A run moves through fixed stages:
//!
//! 1. [`discover_frames`]: find `<prefix>_<YYYY-MM-DD>Z.<ext>` rasters and
//!    order them by date
//! 2. [`compute_global_range`]: min/max over the valid pixels of all frames
//! 3. [`render_frames`]: one titled still per frame with a colorbar, every
//!    frame on the same scale
//! 4. [`assemble_animation`]: looping GIF of the stills in date order
//! 5. [`cleanup`]: delete the run's rasters and stills, on success only
//!
//! [`AnimationPipeline`] chains the stages. The value range is passed from
//! stage to stage; nothing is kept in global state.

pub mod assemble;
pub mod error;
pub mod frames;
pub mod map;
pub mod pipeline;
pub mod range;
pub mod render;

#[cfg(test)]
mod testing;

pub use assemble::{
    assemble_animation, cleanup, discover_stills, still_date_from_filename, validate_fps, AnimationSummary,
};
pub use error::{AnimationError, AnimationResult};
pub use frames::{discover_frames, frame_date_from_filename, Frame, FrameSet};
pub use map::{map_title, MapRequest, MapSummary};
pub use pipeline::{AnimationPipeline, AnimationRequest};
pub use range::{compute_global_range, ValueRange};
pub use render::{render_frames, still_path, still_title, StillImage};
