//! Rendering configuration.
//!
//! Every field has a default so a YAML file only needs to list what it
//! overrides:
//!
//! ```yaml
//! target_width: 640
//! ticks: 6
//! no_data_color: "#ffffff00"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::gradient::Color;
use crate::style::{parse_color, viridis_stops, ColorScale, ColorStop};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Approximate width of the map area; grids are upscaled by an integer
    /// factor to get close to it
    pub target_width: u32,
    /// Upper bound for the integer upscaling factor
    pub max_scale: u32,
    /// Outer margin in pixels
    pub padding: u32,
    /// Title glyph height in pixels
    pub title_size: f32,
    /// Tick label glyph height in pixels
    pub label_size: f32,
    pub colorbar_width: u32,
    /// Space between map and colorbar
    pub colorbar_gap: u32,
    /// Number of labelled colorbar ticks (min and max included)
    pub ticks: u32,
    pub background: String,
    pub foreground: String,
    /// Color for cells without valid data; rejected if it equals a color stop
    pub no_data_color: String,
    pub color_stops: Vec<ColorStop>,
    /// GIF quantizer speed, 1 (best) to 30 (fastest)
    pub gif_speed: i32,
    pub chart_width: u32,
    pub chart_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            target_width: 800,
            max_scale: 32,
            padding: 24,
            title_size: 18.0,
            label_size: 12.0,
            colorbar_width: 24,
            colorbar_gap: 16,
            ticks: 5,
            background: "#ffffff".to_string(),
            foreground: "#000000".to_string(),
            no_data_color: "#d9d9d9".to_string(),
            color_stops: viridis_stops(),
            gif_speed: 10,
            chart_width: 1000,
            chart_height: 600,
        }
    }
}

/// Parsed colors of a [`RenderConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub no_data: Color,
    pub scale: ColorScale,
}

impl RenderConfig {
    /// Check ranges and parse colors.
    pub fn palette(&self) -> RenderResult<Palette> {
        if self.ticks < 2 {
            return Err(RenderError::InvalidScale(format!(
                "at least 2 colorbar ticks required, got {}",
                self.ticks
            )));
        }
        if !(1..=30).contains(&self.gif_speed) {
            return Err(RenderError::InvalidScale(format!(
                "gif_speed must be within 1..=30, got {}",
                self.gif_speed
            )));
        }
        if !(self.title_size > 0.0 && self.label_size > 0.0) {
            return Err(RenderError::InvalidScale("glyph sizes must be positive".to_string()));
        }

        let no_data = parse_color(&self.no_data_color)?;
        let scale = ColorScale::from_stops(&self.color_stops)?;
        if scale.stop_colors().contains(&no_data) {
            return Err(RenderError::InvalidScale(format!(
                "no_data_color {} is also a color stop",
                self.no_data_color
            )));
        }

        Ok(Palette {
            background: parse_color(&self.background)?,
            foreground: parse_color(&self.foreground)?,
            no_data,
            scale,
        })
    }
}
