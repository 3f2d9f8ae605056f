//! Subcommand implementations.

use std::path::Path;

use animation::{AnimationPipeline, AnimationRequest, MapRequest};
use anyhow::{Context, Result};
use image::ImageFormat;
use renderer::chart::{render_line_chart, series_color, ChartSeries, LineChart};
use timeseries::{load_dashboard_table, TimeSeriesTable};
use tracing::info;

use crate::config::DashboardConfig;

pub const CHART_TITLE: &str = "NO2 TIME SERIES FROM SENTINEL 5P";

pub fn animate(config: &DashboardConfig, request: AnimationRequest) -> Result<()> {
    let pipeline = AnimationPipeline::new(config.render.clone()).context("Failed to set up renderer")?;
    let summary = pipeline
        .run(&request)
        .with_context(|| format!("Animation of {} failed", request.frame_dir.display()))?;

    info!(
        output = %summary.path.display(),
        frames = summary.frame_count,
        fps = summary.fps,
        "Animation written"
    );
    Ok(())
}

pub fn assemble(config: &DashboardConfig, still_dir: &Path, output: &Path, fps: f64) -> Result<()> {
    let pipeline = AnimationPipeline::new(config.render.clone()).context("Failed to set up renderer")?;
    let summary = pipeline
        .assemble_still_store(still_dir, output, fps)
        .with_context(|| format!("Assembling stills from {} failed", still_dir.display()))?;

    info!(
        output = %summary.path.display(),
        frames = summary.frame_count,
        "Animation written"
    );
    Ok(())
}

pub fn map(config: &DashboardConfig, request: MapRequest) -> Result<()> {
    let pipeline = AnimationPipeline::new(config.render.clone()).context("Failed to set up renderer")?;
    let summary = pipeline
        .render_map(&request)
        .with_context(|| format!("Rendering map of {} failed", request.raster.display()))?;

    info!(
        output = %summary.path.display(),
        date = %summary.date,
        min = summary.range.min,
        max = summary.range.max,
        "Map written"
    );
    Ok(())
}

/// Chart of every table column, in column order.
pub fn build_chart(table: &TimeSeriesTable) -> LineChart {
    let dates = table.dates();
    let label = |i: usize| dates.get(i).map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();

    LineChart {
        title: CHART_TITLE.to_string(),
        x_label: "TIME".to_string(),
        y_label: "VALUE".to_string(),
        x_bounds: (label(0), label(dates.len().saturating_sub(1))),
        series: table
            .columns()
            .enumerate()
            .map(|(i, (name, values))| ChartSeries {
                label: name.to_string(),
                values: values.to_vec(),
                color: series_color(i),
            })
            .collect(),
    }
}

pub fn timeseries(config: &DashboardConfig, mean: &Path, max: &Path, moving_average: &Path, output: &Path) -> Result<()> {
    let table = load_dashboard_table(mean, max, moving_average).context("Failed to load time series")?;
    let chart = build_chart(&table);
    let image = render_line_chart(&config.render, &chart).context("Failed to draw time-series chart")?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    image
        .save_with_format(output, ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(output = %output.display(), rows = table.len(), "Time-series chart written");
    Ok(())
}
