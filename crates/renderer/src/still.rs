//! Titled stills: a color-mapped grid with a colorbar legend.
//!
//! ```text
//!  +--------------------------------------------------+
//!  |            NO2 CONCENTRATION AT 2019-07-15       |
//!  |  +--------------------------+   +--+             |
//!  |  |                          |   |  |- 1.50E-4    |
//!  |  |       map (scaled)       |   |  |- ...        |
//!  |  |                          |   |  |- 2.00E-5    |
//!  |  +--------------------------+   +--+             |
//!  +--------------------------------------------------+
//! ```
//!
//! The map is upscaled by an integer factor with nearest-neighbour
//! replication, so every grid cell becomes a solid square and no colors are
//! invented by resampling.

use image::RgbaImage;
use tiny_skia::{ColorU8, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use tracing::debug;

use crate::config::{Palette, RenderConfig};
use crate::error::{RenderError, RenderResult};
use crate::glyphs::{draw_text, text_width, Anchor};
use crate::gradient::{render_grid, Color};

/// Borrowed view of a single-band grid and its validity mask.
#[derive(Debug, Clone, Copy)]
pub struct GridView<'a> {
    pub data: &'a [f32],
    pub valid: &'a [bool],
    pub width: usize,
    pub height: usize,
}

impl<'a> GridView<'a> {
    pub fn new(data: &'a [f32], valid: &'a [bool], width: usize, height: usize) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidGrid(format!("empty grid {}x{}", width, height)));
        }
        if data.len() != width * height || valid.len() != data.len() {
            return Err(RenderError::InvalidGrid(format!(
                "{}x{} grid with {} values and {} mask entries",
                width,
                height,
                data.len(),
                valid.len()
            )));
        }
        Ok(Self {
            data,
            valid,
            width,
            height,
        })
    }
}

/// Pixel geometry of a still.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StillLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Integer upscaling factor applied to grid cells
    pub cell_size: u32,
    pub map_x: u32,
    pub map_y: u32,
    pub map_width: u32,
    pub map_height: u32,
    pub colorbar_x: u32,
    pub colorbar_width: u32,
}

impl StillLayout {
    /// Canvas pixel at the center of grid cell (col, row).
    pub fn cell_center(&self, col: usize, row: usize) -> (u32, u32) {
        let half = self.cell_size / 2;
        (
            self.map_x + col as u32 * self.cell_size + half,
            self.map_y + row as u32 * self.cell_size + half,
        )
    }

    /// Canvas y of the colorbar row for scale position `t` (0 = bottom).
    pub fn colorbar_y(&self, t: f32) -> f32 {
        let span = self.map_height.saturating_sub(1) as f32;
        self.map_y as f32 + (1.0 - t.clamp(0.0, 1.0)) * span
    }
}

/// Format a colorbar tick so that every label in a legend uses the same
/// notation. Very small or very large magnitudes switch to scientific form.
pub fn format_tick(value: f32, min: f32, max: f32) -> String {
    let magnitude = min.abs().max(max.abs());
    let span = (max - min).abs();

    if magnitude > 0.0 && (magnitude < 1e-2 || magnitude >= 1e5) {
        return format!("{:.2e}", value).to_ascii_uppercase();
    }
    let value = if value == 0.0 { 0.0 } else { value }; // no "-0.0"
    if span >= 10.0 {
        format!("{:.0}", value)
    } else if span >= 1.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Renders stills for one color configuration.
#[derive(Debug, Clone)]
pub struct StillRenderer {
    config: RenderConfig,
    palette: Palette,
}

impl StillRenderer {
    pub fn new(config: RenderConfig) -> RenderResult<Self> {
        let palette = config.palette()?;
        Ok(Self { config, palette })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Tick values from `min` (first) to `max` (last).
    pub fn tick_values(&self, min: f32, max: f32) -> Vec<f32> {
        let n = self.config.ticks.max(2);
        (0..n)
            .map(|i| min + (max - min) * i as f32 / (n - 1) as f32)
            .collect()
    }

    fn tick_labels(&self, min: f32, max: f32) -> Vec<String> {
        self.tick_values(min, max)
            .into_iter()
            .map(|v| format_tick(v, min, max))
            .collect()
    }

    /// Geometry for a `grid_width` x `grid_height` grid on range `min..max`.
    pub fn layout(&self, grid_width: usize, grid_height: usize, min: f32, max: f32) -> StillLayout {
        let c = &self.config;
        let label_width = self
            .tick_labels(min, max)
            .iter()
            .map(|l| text_width(l, c.label_size))
            .fold(0.0f32, f32::max)
            .ceil() as u32;

        // The map fits a target_width square, so tall grids are not blown up
        let fit = c.target_width / grid_width.max(grid_height).max(1) as u32;
        let cell_size = fit.clamp(1, c.max_scale.max(1));
        let map_width = grid_width as u32 * cell_size;
        let map_height = grid_height as u32 * cell_size;

        let title_band = (c.title_size * 2.0).ceil() as u32;
        let tick_len = (c.label_size / 2.0).ceil() as u32;
        let map_x = c.padding;
        let map_y = c.padding + title_band;
        let colorbar_x = map_x + map_width + c.colorbar_gap;
        let labels_x = colorbar_x + c.colorbar_width + tick_len + 4;

        // Title may be wider than the map on small grids
        let content_width = (labels_x + label_width).max(c.padding + self.title_width_hint());
        let canvas_width = content_width + c.padding;
        // Extra label_size keeps the bottom tick label inside the canvas
        let canvas_height = map_y + map_height + c.label_size.ceil() as u32 + c.padding;

        StillLayout {
            canvas_width,
            canvas_height,
            cell_size,
            map_x,
            map_y,
            map_width,
            map_height,
            colorbar_x,
            colorbar_width: c.colorbar_width,
        }
    }

    /// Width reserved for titles: "NO2 CONCENTRATION SCREENSHOT AT YYYY-MM-DD"
    /// is the longest title the dashboard draws.
    fn title_width_hint(&self) -> u32 {
        text_width("NO2 CONCENTRATION SCREENSHOT AT 0000-00-00", self.config.title_size).ceil() as u32
    }

    /// Render a still. Cells are colored on `min..max`, whatever the grid's
    /// own extremes are.
    pub fn render(&self, grid: GridView<'_>, min: f32, max: f32, title: &str) -> RenderResult<RgbaImage> {
        let layout = self.layout(grid.width, grid.height, min, max);
        let palette = &self.palette;

        let mut pixmap = Pixmap::new(layout.canvas_width, layout.canvas_height).ok_or(RenderError::Canvas {
            width: layout.canvas_width,
            height: layout.canvas_height,
        })?;
        let bg = palette.background;
        pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));

        let cells = render_grid(
            grid.data,
            grid.valid,
            grid.width,
            grid.height,
            min,
            max,
            &palette.scale,
            palette.no_data,
        );
        blit_cells(&mut pixmap, &cells, grid.width, &layout);
        self.draw_colorbar(&mut pixmap, &layout);

        let fg = palette.foreground;
        frame_rect(
            &mut pixmap,
            layout.map_x as f32,
            layout.map_y as f32,
            layout.map_width as f32,
            layout.map_height as f32,
            fg,
        );

        let ticks = self.tick_values(min, max);
        let n = ticks.len();
        let tick_len = (self.config.label_size / 2.0).ceil();
        let bar_right = (layout.colorbar_x + layout.colorbar_width) as f32;
        for (i, value) in ticks.into_iter().enumerate() {
            let t = i as f32 / (n - 1) as f32;
            let y = layout.colorbar_y(t) + 0.5;
            stroke_line(&mut pixmap, bar_right, y, bar_right + tick_len, y, fg);
            draw_text(
                &mut pixmap,
                &format_tick(value, min, max),
                bar_right + tick_len + 4.0,
                y,
                self.config.label_size,
                Anchor::Start,
                fg,
            );
        }

        let title_y = self.config.padding as f32 + self.config.title_size;
        let title_x = layout.map_x as f32 + layout.map_width as f32 / 2.0;
        let title_x = title_x.max(self.config.padding as f32 + text_width(title, self.config.title_size) / 2.0);
        draw_text(&mut pixmap, title, title_x, title_y, self.config.title_size, Anchor::Middle, fg);

        debug!(
            width = layout.canvas_width,
            height = layout.canvas_height,
            cell_size = layout.cell_size,
            title = %title,
            "Rendered still"
        );

        Ok(pixmap_to_image(&pixmap))
    }

    fn draw_colorbar(&self, pixmap: &mut Pixmap, layout: &StillLayout) {
        let scale = &self.palette.scale;
        let canvas_w = pixmap.width() as usize;
        let rows = layout.map_height;
        let pixels = pixmap.pixels_mut();

        for r in 0..rows {
            let t = if rows > 1 { 1.0 - r as f32 / (rows - 1) as f32 } else { 0.5 };
            let color = premultiplied(scale.color_at(t));
            let y = (layout.map_y + r) as usize;
            let x0 = layout.colorbar_x as usize;
            let x1 = x0 + layout.colorbar_width as usize;
            pixels[y * canvas_w + x0..y * canvas_w + x1].fill(color);
        }

        frame_rect(
            pixmap,
            layout.colorbar_x as f32,
            layout.map_y as f32,
            layout.colorbar_width as f32,
            layout.map_height as f32,
            self.palette.foreground,
        );
    }
}

fn premultiplied(color: Color) -> tiny_skia::PremultipliedColorU8 {
    ColorU8::from_rgba(color.r, color.g, color.b, color.a).premultiply()
}

/// Copy colorized cells into the map area, replicating each cell into a
/// `cell_size` square.
fn blit_cells(pixmap: &mut Pixmap, cells: &[u8], grid_width: usize, layout: &StillLayout) {
    let canvas_w = pixmap.width() as usize;
    let cell = layout.cell_size as usize;
    let pixels = pixmap.pixels_mut();

    for (idx, rgba) in cells.chunks_exact(4).enumerate() {
        let color = ColorU8::from_rgba(rgba[0], rgba[1], rgba[2], rgba[3]).premultiply();
        let col = idx % grid_width;
        let row = idx / grid_width;
        let x0 = layout.map_x as usize + col * cell;
        let y0 = layout.map_y as usize + row * cell;
        for y in y0..y0 + cell {
            pixels[y * canvas_w + x0..y * canvas_w + x0 + cell].fill(color);
        }
    }
}

fn stroke_line(pixmap: &mut Pixmap, x0: f32, y0: f32, x1: f32, y1: f32, color: Color) {
    let mut pb = PathBuilder::new();
    pb.move_to(x0, y0);
    pb.line_to(x1, y1);
    if let Some(path) = pb.finish() {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        let stroke = Stroke {
            width: 1.0,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

/// One-pixel outline just outside the given rectangle.
fn frame_rect(pixmap: &mut Pixmap, x: f32, y: f32, w: f32, h: f32, color: Color) {
    if let Some(rect) = Rect::from_xywh(x - 0.5, y - 0.5, w + 1.0, h + 1.0) {
        let path = PathBuilder::from_rect(rect);
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        let stroke = Stroke {
            width: 1.0,
            ..Stroke::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

/// Convert a premultiplied pixmap into a straight-alpha image.
pub fn pixmap_to_image(pixmap: &Pixmap) -> RgbaImage {
    let mut data = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    // Dimensions come from the pixmap itself, so the buffer always fits
    RgbaImage::from_raw(pixmap.width(), pixmap.height(), data)
        .unwrap_or_else(|| RgbaImage::new(pixmap.width(), pixmap.height()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tick_scientific_for_small_values() {
        assert_eq!(format_tick(1.5e-4, 2e-5, 1.5e-4), "1.50E-4");
        assert_eq!(format_tick(0.0, 0.0, 1e-4), "0.00E0");
    }

    #[test]
    fn test_format_tick_decimals_follow_span() {
        assert_eq!(format_tick(12.0, -3.0, 12.0), "12");
        assert_eq!(format_tick(2.3, 0.0, 5.0), "2.3");
        assert_eq!(format_tick(0.5, 0.1, 0.9), "0.50");
    }

    #[test]
    fn test_layout_upscales_small_grids() {
        let renderer = StillRenderer::new(RenderConfig::default()).unwrap();
        let layout = renderer.layout(10, 5, 0.0, 1.0);
        assert_eq!(layout.cell_size, 32);
        assert_eq!(layout.map_width, 320);
        assert_eq!(layout.map_height, 160);
        assert!(layout.canvas_width > layout.colorbar_x + layout.colorbar_width);
    }

    #[test]
    fn test_layout_fits_tall_grids() {
        let renderer = StillRenderer::new(RenderConfig::default()).unwrap();
        let layout = renderer.layout(1, 2000, 0.0, 1.0);
        assert_eq!(layout.cell_size, 1);
        assert_eq!(layout.map_height, 2000);

        let layout = renderer.layout(10, 100, 0.0, 1.0);
        assert_eq!(layout.cell_size, 8);
        assert!(layout.map_height <= RenderConfig::default().target_width);
    }

    #[test]
    fn test_cell_center_inside_map() {
        let renderer = StillRenderer::new(RenderConfig::default()).unwrap();
        let layout = renderer.layout(4, 4, 0.0, 1.0);
        let (x, y) = layout.cell_center(3, 3);
        assert!(x < layout.map_x + layout.map_width);
        assert!(y < layout.map_y + layout.map_height);
    }
}
