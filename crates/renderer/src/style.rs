//! Color scale configuration for concentration rendering.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::gradient::{interpolate_color, Color};

/// Color stop for a gradient.
///
/// `value` is a position on the scale; positions are rescaled so the first
/// stop sits at 0 and the last at 1.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ColorStop {
    pub value: f32,
    pub color: String,
}

impl ColorStop {
    pub fn new(value: f32, color: impl Into<String>) -> Self {
        Self {
            value,
            color: color.into(),
        }
    }
}

/// Matplotlib's viridis sampled at deciles.
pub const VIRIDIS: [(f32, &str); 11] = [
    (0.0, "#440154"),
    (0.1, "#482475"),
    (0.2, "#414487"),
    (0.3, "#355f8d"),
    (0.4, "#2a788e"),
    (0.5, "#21918c"),
    (0.6, "#22a884"),
    (0.7, "#44bf70"),
    (0.8, "#7ad151"),
    (0.9, "#bddf26"),
    (1.0, "#fde725"),
];

/// Default stops (viridis).
pub fn viridis_stops() -> Vec<ColorStop> {
    VIRIDIS.iter().map(|&(v, c)| ColorStop::new(v, c)).collect()
}

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;

    Some((r, g, b))
}

/// Parse `#RRGGBB` or `#RRGGBBAA`.
pub fn parse_color(hex: &str) -> RenderResult<Color> {
    let trimmed = hex.trim().trim_start_matches('#');
    let parsed = match trimmed.len() {
        6 => hex_to_rgb(trimmed).map(|(r, g, b)| Color::rgb(r, g, b)),
        8 => hex_to_rgb(&trimmed[0..6]).and_then(|(r, g, b)| {
            u8::from_str_radix(&trimmed[6..8], 16)
                .ok()
                .map(|a| Color::new(r, g, b, a))
        }),
        _ => None,
    };
    parsed.ok_or_else(|| RenderError::InvalidColor(hex.to_string()))
}

/// A continuous color scale over [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    positions: Vec<f32>,
    colors: Vec<Color>,
}

impl ColorScale {
    /// Build a scale from stops. Needs at least two stops spanning a
    /// non-empty interval.
    pub fn from_stops(stops: &[ColorStop]) -> RenderResult<Self> {
        if stops.len() < 2 {
            return Err(RenderError::InvalidScale(format!(
                "need at least 2 color stops, got {}",
                stops.len()
            )));
        }

        let mut stops = stops.to_vec();
        stops.sort_by(|a, b| a.value.total_cmp(&b.value));

        let first = stops[0].value;
        let last = stops[stops.len() - 1].value;
        if !(last > first) || !first.is_finite() || !last.is_finite() {
            return Err(RenderError::InvalidScale(format!(
                "stop positions must span a finite interval, got {}..{}",
                first, last
            )));
        }

        let positions = stops.iter().map(|s| (s.value - first) / (last - first)).collect();
        let colors = stops
            .iter()
            .map(|s| parse_color(&s.color))
            .collect::<RenderResult<Vec<_>>>()?;

        Ok(Self { positions, colors })
    }

    pub fn viridis() -> Self {
        Self {
            positions: VIRIDIS.iter().map(|&(v, _)| v).collect(),
            colors: VIRIDIS
                .iter()
                .filter_map(|&(_, c)| hex_to_rgb(c))
                .map(|(r, g, b)| Color::rgb(r, g, b))
                .collect(),
        }
    }

    /// Colors of the stops, lowest position first.
    pub fn stop_colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color at position `t` (clamped to [0, 1]).
    pub fn color_at(&self, t: f32) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        // First stop at or above t
        let upper = self
            .positions
            .iter()
            .position(|&p| p >= t)
            .unwrap_or(self.positions.len() - 1);
        if upper == 0 {
            return self.colors[0];
        }

        let lower = upper - 1;
        let span = self.positions[upper] - self.positions[lower];
        let local = if span > 0.0 {
            (t - self.positions[lower]) / span
        } else {
            0.0
        };
        interpolate_color(self.colors[lower], self.colors[upper], local)
    }

    /// Color of the low end.
    pub fn low(&self) -> Color {
        self.colors[0]
    }

    /// Color of the high end.
    pub fn high(&self) -> Color {
        self.colors[self.colors.len() - 1]
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::viridis()
    }
}
