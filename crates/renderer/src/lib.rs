//! Image rendering for NO2 concentration products.
//!
//! Implements:
//! - Color scales (viridis by default) and grid colorization
//! - Titled stills with a colorbar legend
//! - Time-series line charts
//! - Looping GIF encoding

pub mod chart;
pub mod config;
pub mod error;
pub mod gif;
pub mod glyphs;
pub mod gradient;
pub mod still;
pub mod style;

pub use config::RenderConfig;
pub use error::{RenderError, RenderResult};
pub use gradient::Color;
pub use still::{GridView, StillLayout, StillRenderer};
pub use style::{ColorScale, ColorStop};
