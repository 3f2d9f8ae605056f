//! Aggregate NO2 time series.
//!
//! The back end returns spatially aggregated values (mean, max, and the mean
//! of a moving-average cube) as JSON deliveries. This crate parses them,
//! joins them on date and adds a rolling-mean smoothing column, ready for
//! charting.

pub mod error;
pub mod rolling;
pub mod series;
pub mod table;

use std::path::Path;

use tracing::info;

pub use error::{TimeSeriesError, TimeSeriesResult};
pub use rolling::rolling_mean;
pub use series::{parse_timestamp, TimeSeries};
pub use table::TimeSeriesTable;

/// Column names of a dashboard table, in plotting order.
pub const MEAN: &str = "Mean";
pub const MAX: &str = "Max";
pub const MOVING_AVERAGE: &str = "MA";
pub const SMOOTH: &str = "Smooth";

/// Samples in the smoothing window.
pub const SMOOTH_WINDOW: usize = 31;

/// Load the mean, max and moving-average deliveries and build the
/// dashboard table, smoothing column included.
pub fn load_dashboard_table(mean: &Path, max: &Path, moving_average: &Path) -> TimeSeriesResult<TimeSeriesTable> {
    let series = [
        TimeSeries::load(MEAN, mean)?,
        TimeSeries::load(MAX, max)?,
        TimeSeries::load(MOVING_AVERAGE, moving_average)?,
    ];
    let table = TimeSeriesTable::join(&series)?.with_rolling_mean(MEAN, SMOOTH, SMOOTH_WINDOW)?;

    info!(rows = table.len(), window = SMOOTH_WINDOW, "Loaded time-series table");
    Ok(table)
}
