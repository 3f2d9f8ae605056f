//! Single-date map rendering.
//!
//! Unlike animation frames, a map is scaled on its own value range.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use image::ImageFormat;
use raster_reader::RasterSource;
use renderer::{GridView, StillRenderer};
use tracing::info;

use crate::error::{AnimationError, AnimationResult};
use crate::frames::frame_date_from_filename;
use crate::range::ValueRange;

/// Title drawn above a map.
pub fn map_title(date: NaiveDate) -> String {
    format!("NO2 CONCENTRATION SCREENSHOT AT {}", date.format("%Y-%m-%d"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapRequest {
    pub raster: PathBuf,
    pub output: PathBuf,
    /// Overrides the date taken from the raster's filename
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapSummary {
    pub path: PathBuf,
    pub date: NaiveDate,
    pub range: ValueRange,
}

fn resolve_date(raster: &Path, date: Option<NaiveDate>) -> AnimationResult<NaiveDate> {
    if let Some(date) = date {
        return Ok(date);
    }
    let name = raster
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AnimationError::MissingDate(raster.to_path_buf()))?;
    frame_date_from_filename(name)?.ok_or_else(|| AnimationError::MissingDate(raster.to_path_buf()))
}

/// Render one raster to a PNG. The raster itself is left in place.
pub fn render_map<S: RasterSource>(
    source: &S,
    renderer: &StillRenderer,
    request: &MapRequest,
) -> AnimationResult<MapSummary> {
    let date = resolve_date(&request.raster, request.date)?;
    let raster = source.read(&request.raster)?;
    let (lo, hi) = raster
        .value_range()
        .ok_or(AnimationError::NoValidPixels { frames: 1 })?;
    let range = ValueRange::new(lo, hi);

    let (width, height) = raster.dimensions();
    let grid = GridView::new(raster.data(), raster.mask(), width, height)
        .map_err(|e| AnimationError::render_failure(date, e))?;
    let image = renderer
        .render(grid, range.min, range.max, &map_title(date))
        .map_err(|e| AnimationError::render_failure(date, e))?;

    if let Some(parent) = request.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AnimationError::io(parent, e))?;
    }
    image
        .save_with_format(&request.output, ImageFormat::Png)
        .map_err(|e| AnimationError::render_failure(date, format!("writing {}: {}", request.output.display(), e)))?;

    info!(
        date = %date,
        min = range.min,
        max = range.max,
        path = %request.output.display(),
        "Rendered map"
    );
    Ok(MapSummary {
        path: request.output.clone(),
        date,
        range,
    })
}
