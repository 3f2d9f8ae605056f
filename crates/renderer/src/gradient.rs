//! Gradient rendering for gridded concentration data.

use rayon::prelude::*;

use crate::style::ColorScale;

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Linear color interpolation, `t` clamped to [0, 1].
pub fn interpolate_color(color1: Color, color2: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let t_inv = 1.0 - t;

    Color::new(
        ((color1.r as f32 * t_inv) + (color2.r as f32 * t)).round() as u8,
        ((color1.g as f32 * t_inv) + (color2.g as f32 * t)).round() as u8,
        ((color1.b as f32 * t_inv) + (color2.b as f32 * t)).round() as u8,
        ((color1.a as f32 * t_inv) + (color2.a as f32 * t)).round() as u8,
    )
}

/// Position of `value` between `min` and `max`, clamped to [0, 1].
///
/// A degenerate range (`max <= min`) puts every value on the midpoint.
pub fn normalize(value: f32, min: f32, max: f32) -> f32 {
    // f64 so spans near f32::MAX stay finite
    let (value, min, max) = (value as f64, min as f64, max as f64);
    let range = max - min;
    if !(range > 0.0) {
        return 0.5;
    }
    ((value - min) / range).clamp(0.0, 1.0) as f32
}

/// Colorize a grid through a color scale.
///
/// # Arguments
/// - `data`: grid values (row-major order)
/// - `valid`: validity mask, same length as `data`
/// - `width`, `height`: grid dimensions
/// - `min_val`, `max_val`: value range mapped onto the two ends of the scale
/// - `scale`: color scale
/// - `no_data`: color used for invalid cells
///
/// # Returns
/// RGBA pixel data (4 bytes per pixel)
#[allow(clippy::too_many_arguments)]
pub fn render_grid(
    data: &[f32],
    valid: &[bool],
    width: usize,
    height: usize,
    min_val: f32,
    max_val: f32,
    scale: &ColorScale,
    no_data: Color,
) -> Vec<u8> {
    let mut pixels = vec![0u8; width * height * 4];
    if width == 0 || height == 0 {
        return pixels;
    }

    pixels
        .par_chunks_mut(width * 4)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
                let idx = y * width + x;
                let color = match (data.get(idx), valid.get(idx)) {
                    (Some(&value), Some(&true)) if value.is_finite() => {
                        scale.color_at(normalize(value, min_val, max_val))
                    }
                    _ => no_data,
                };
                pixel.copy_from_slice(&color.to_rgba());
            }
        });

    pixels
}
