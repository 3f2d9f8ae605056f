//! Line charts for time series.
//!
//! Samples are spaced evenly along the x axis. Missing samples break the
//! line instead of being bridged.

use image::RgbaImage;
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use tracing::debug;

use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::glyphs::{draw_text, text_width, Anchor};
use crate::gradient::Color;
use crate::still::{format_tick, pixmap_to_image};
use crate::style::parse_color;

/// Matplotlib's tab10 cycle.
pub const TAB10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f", "#bcbd22",
    "#17becf",
];

/// Color `index` of the default series cycle.
pub fn series_color(index: usize) -> Color {
    parse_color(TAB10[index % TAB10.len()]).unwrap_or(Color::rgb(0, 0, 0))
}

/// One line of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<Option<f64>>,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Labels of the first and last sample
    pub x_bounds: (String, String),
    pub series: Vec<ChartSeries>,
}

impl LineChart {
    /// Finite min and max over every series, `None` when nothing is plotted.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().flatten())
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    fn sample_count(&self) -> usize {
        self.series.iter().map(|s| s.values.len()).max().unwrap_or(0)
    }
}

/// Plot area of a chart in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PlotArea {
    /// Canvas x for sample `i` of `n`.
    pub fn x_at(&self, i: usize, n: usize) -> f32 {
        if n <= 1 {
            return (self.left + self.right) / 2.0;
        }
        self.left + (self.right - self.left) * i as f32 / (n - 1) as f32
    }

    /// Canvas y for `value` on `lo..hi`.
    pub fn y_at(&self, value: f64, lo: f64, hi: f64) -> f32 {
        let t = ((value - lo) / (hi - lo)) as f32;
        self.bottom - (self.bottom - self.top) * t
    }
}

/// Pad a degenerate range so a flat line sits mid-plot.
fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    if hi > lo {
        let pad = (hi - lo) * 0.05;
        (lo - pad, hi + pad)
    } else {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
        (lo - pad, hi + pad)
    }
}

fn plot_area(config: &RenderConfig) -> PlotArea {
    let pad = config.padding as f32;
    let label = config.label_size;
    let y_labels = text_width("-0.00E-00", label) + label;
    PlotArea {
        left: pad + label * 2.0 + y_labels,
        top: pad + config.title_size * 2.0,
        right: config.chart_width as f32 - pad,
        bottom: config.chart_height as f32 - pad - label * 4.0,
    }
}

/// Draw `chart` on a `chart_width` x `chart_height` canvas.
pub fn render_line_chart(config: &RenderConfig, chart: &LineChart) -> RenderResult<RgbaImage> {
    let palette = config.palette()?;
    let (lo, hi) = chart
        .value_range()
        .ok_or_else(|| RenderError::InvalidGrid("chart has no finite values".to_string()))?;
    let (lo, hi) = padded_range(lo, hi);

    let width = config.chart_width;
    let height = config.chart_height;
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::Canvas { width, height })?;
    let bg = palette.background;
    pixmap.fill(tiny_skia::Color::from_rgba8(bg.r, bg.g, bg.b, bg.a));

    let area = plot_area(config);
    if !(area.right > area.left && area.bottom > area.top) {
        return Err(RenderError::Canvas { width, height });
    }
    let fg = palette.foreground;
    let label = config.label_size;

    // Axes box
    if let Some(rect) = Rect::from_ltrb(area.left, area.top, area.right, area.bottom) {
        stroke(&mut pixmap, PathBuilder::from_rect(rect), fg, 1.0);
    }

    // Y ticks
    let ticks = config.ticks.max(2);
    for i in 0..ticks {
        let value = lo + (hi - lo) * i as f64 / (ticks - 1) as f64;
        let y = area.y_at(value, lo, hi);
        let mut pb = PathBuilder::new();
        pb.move_to(area.left - label / 2.0, y);
        pb.line_to(area.left, y);
        if let Some(path) = pb.finish() {
            stroke(&mut pixmap, path, fg, 1.0);
        }
        let text = format_tick(value as f32, lo as f32, hi as f32);
        draw_text(&mut pixmap, &text, area.left - label, y, label, Anchor::End, fg);
    }

    // X bounds
    let label_y = area.bottom + label * 1.5;
    draw_text(&mut pixmap, &chart.x_bounds.0, area.left, label_y, label, Anchor::Start, fg);
    draw_text(&mut pixmap, &chart.x_bounds.1, area.right, label_y, label, Anchor::End, fg);

    let mid_x = (area.left + area.right) / 2.0;
    draw_text(&mut pixmap, &chart.x_label, mid_x, area.bottom + label * 3.0, label, Anchor::Middle, fg);
    draw_text(
        &mut pixmap,
        &chart.y_label,
        config.padding as f32,
        (area.top + area.bottom) / 2.0,
        label,
        Anchor::Start,
        fg,
    );
    draw_text(
        &mut pixmap,
        &chart.title,
        width as f32 / 2.0,
        config.padding as f32 + config.title_size / 2.0,
        config.title_size,
        Anchor::Middle,
        fg,
    );

    let n = chart.sample_count();
    for series in &chart.series {
        draw_series(&mut pixmap, &area, series, n, lo, hi);
    }
    draw_legend(&mut pixmap, &area, &chart.series, label, fg);

    debug!(
        series = chart.series.len(),
        samples = n,
        title = %chart.title,
        "Rendered line chart"
    );

    Ok(pixmap_to_image(&pixmap))
}

fn draw_series(pixmap: &mut Pixmap, area: &PlotArea, series: &ChartSeries, n: usize, lo: f64, hi: f64) {
    let mut pb = PathBuilder::new();
    let mut pen_down = false;
    let mut isolated = Vec::new();
    let mut run_len = 0;

    for (i, value) in series.values.iter().enumerate() {
        match *value {
            Some(v) if v.is_finite() => {
                let (x, y) = (area.x_at(i, n), area.y_at(v, lo, hi));
                if pen_down {
                    pb.line_to(x, y);
                } else {
                    pb.move_to(x, y);
                    pen_down = true;
                }
                run_len += 1;
                if run_len == 1 {
                    isolated.push((x, y));
                } else if run_len == 2 {
                    isolated.pop();
                }
            }
            _ => {
                pen_down = false;
                run_len = 0;
            }
        }
    }

    // Single samples between gaps would vanish as zero-length lines
    for (x, y) in isolated {
        pb.push_circle(x, y, 2.0);
    }

    if let Some(path) = pb.finish() {
        stroke(pixmap, path, series.color, 2.0);
    }
}

fn draw_legend(pixmap: &mut Pixmap, area: &PlotArea, series: &[ChartSeries], size: f32, fg: Color) {
    let swatch = size * 2.0;
    let x = area.left + size;
    for (i, s) in series.iter().enumerate() {
        let y = area.top + size * (1.0 + 1.5 * i as f32);
        let mut pb = PathBuilder::new();
        pb.move_to(x, y);
        pb.line_to(x + swatch, y);
        if let Some(path) = pb.finish() {
            stroke(pixmap, path, s.color, 2.0);
        }
        draw_text(pixmap, &s.label, x + swatch + size / 2.0, y, size, Anchor::Start, fg);
    }
}

fn stroke(pixmap: &mut Pixmap, path: tiny_skia::Path, color: Color, width: f32) {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    let stroke = Stroke {
        width,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}
