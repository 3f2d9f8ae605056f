//! Several series joined on date.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{TimeSeriesError, TimeSeriesResult};
use crate::rolling::rolling_mean;
use crate::series::TimeSeries;

/// Columns of values over a shared, ascending date index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeriesTable {
    dates: Vec<NaiveDate>,
    columns: Vec<(String, Vec<Option<f64>>)>,
}

impl TimeSeriesTable {
    /// Outer join on the union of all dates. A series without a value for a
    /// date gets a gap there.
    pub fn join(series: &[TimeSeries]) -> TimeSeriesResult<Self> {
        let dates: Vec<NaiveDate> = series
            .iter()
            .flat_map(|s| s.points.keys().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if dates.is_empty() {
            return Err(TimeSeriesError::EmptyTable);
        }

        let columns = series
            .iter()
            .map(|s| {
                let values = dates.iter().map(|d| s.get(*d)).collect();
                (s.name.clone(), values)
            })
            .collect();

        debug!(rows = dates.len(), columns = series.len(), "Joined time series");
        Ok(Self { dates, columns })
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &[Option<f64>])> + '_ {
        self.columns.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// Append `target` as the trailing rolling mean of `source`.
    pub fn with_rolling_mean(mut self, source: &str, target: &str, window: usize) -> TimeSeriesResult<Self> {
        let values = self
            .column(source)
            .ok_or_else(|| TimeSeriesError::UnknownColumn(source.to_string()))?;
        let smoothed = rolling_mean(values, window);
        self.columns.push((target.to_string(), smoothed));
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 7, day).unwrap()
    }

    fn series(name: &str, points: &[(u32, Option<f64>)]) -> TimeSeries {
        let mut s = TimeSeries::new(name);
        for &(day, v) in points {
            s.points.insert(d(day), v);
        }
        s
    }

    #[test]
    fn test_join_on_union_of_dates() {
        let mean = series("Mean", &[(1, Some(1.0)), (3, Some(3.0))]);
        let max = series("Max", &[(2, Some(20.0)), (3, None)]);

        let table = TimeSeriesTable::join(&[mean, max]).unwrap();

        assert_eq!(table.dates(), &[d(1), d(2), d(3)]);
        assert_eq!(table.column("Mean").unwrap(), &[Some(1.0), None, Some(3.0)]);
        assert_eq!(table.column("Max").unwrap(), &[None, Some(20.0), None]);
    }

    #[test]
    fn test_join_empty_is_error() {
        assert!(matches!(
            TimeSeriesTable::join(&[TimeSeries::new("Mean")]),
            Err(TimeSeriesError::EmptyTable)
        ));
    }

    #[test]
    fn test_rolling_column_appended_last() {
        let mean = series("Mean", &[(1, Some(1.0)), (2, Some(3.0))]);
        let table = TimeSeriesTable::join(&[mean])
            .unwrap()
            .with_rolling_mean("Mean", "Smooth", 2)
            .unwrap();

        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["Mean", "Smooth"]);
        assert_eq!(table.column("Smooth").unwrap(), &[None, Some(2.0)]);
    }

    #[test]
    fn test_rolling_unknown_column() {
        let table = TimeSeriesTable::join(&[series("Mean", &[(1, Some(1.0))])]).unwrap();
        assert!(table.with_rolling_mean("Median", "Smooth", 2).is_err());
    }
}
