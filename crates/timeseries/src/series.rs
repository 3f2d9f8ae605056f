//! Aggregate time series as delivered by the processing back end.
//!
//! A delivery is a JSON object keyed by timestamp. Each value holds one
//! array per geometry and, inside it, one number per band:
//!
//! ```json
//! {
//!   "2019-07-01T00:00:00Z": [[3.1e-5]],
//!   "2019-07-02T00:00:00Z": [[null]]
//! }
//! ```
//!
//! Only the first geometry and first band are used. `null` (or an empty
//! array) is a gap.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{TimeSeriesError, TimeSeriesResult};

/// Parse a delivery key into a calendar date.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` and plain
/// `YYYY-MM-DD`.
pub fn parse_timestamp(key: &str) -> TimeSeriesResult<NaiveDate> {
    let key = key.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(key) {
        return Ok(ts.date_naive());
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(key, "%Y-%m-%dT%H:%M:%S") {
        return Ok(ts.date());
    }
    NaiveDate::parse_from_str(key, "%Y-%m-%d").map_err(|_| TimeSeriesError::InvalidTimestamp(key.to_string()))
}

/// First scalar of a nested array, `None` for null or empty.
fn first_scalar(value: &Value, origin: &str, key: &str) -> TimeSeriesResult<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => Ok(n.as_f64()),
        Value::Array(items) => match items.first() {
            Some(first) => first_scalar(first, origin, key),
            None => Ok(None),
        },
        other => Err(TimeSeriesError::InvalidShape {
            origin: origin.to_string(),
            reason: format!("value for '{}' is not numeric: {}", key, other),
        }),
    }
}

/// A named series of daily values with gaps.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    pub name: String,
    pub points: BTreeMap<NaiveDate, Option<f64>>,
}

impl TimeSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: BTreeMap::new(),
        }
    }

    /// Parse a delivery. `origin` names the source in errors.
    pub fn from_json_str(name: impl Into<String>, text: &str, origin: &str) -> TimeSeriesResult<Self> {
        let root: Value = serde_json::from_str(text).map_err(|source| TimeSeriesError::InvalidJson {
            origin: origin.to_string(),
            source,
        })?;
        let Value::Object(entries) = root else {
            return Err(TimeSeriesError::InvalidShape {
                origin: origin.to_string(),
                reason: "top level is not an object".to_string(),
            });
        };

        let mut series = Self::new(name);
        for (key, value) in &entries {
            let date = parse_timestamp(key)?;
            let sample = first_scalar(value, origin, key)?;
            if series.points.insert(date, sample).is_some() {
                warn!(series = %series.name, date = %date, "Duplicate date in delivery, keeping the later entry");
            }
        }

        debug!(series = %series.name, points = series.len(), origin = %origin, "Parsed time series");
        Ok(series)
    }

    /// Read and parse a delivery file.
    pub fn load(name: impl Into<String>, path: &Path) -> TimeSeriesResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| TimeSeriesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(name, &text, &path.display().to_string())
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.points.get(&date).copied().flatten()
    }
}
