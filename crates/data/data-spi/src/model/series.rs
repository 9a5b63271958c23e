//! Time series built from a table.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::{CellType, Column, Interval, Table};
use crate::error::Result;

/// A single `(timestamp, value)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl Observation {
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Ordered sequence of observations with no missing values, tagged with a
/// nominal sampling interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    date_column: String,
    value_column: String,
    points: Vec<Observation>,
    interval: Interval,
    spacing_consistent: bool,
}

impl TimeSeries {
    /// Wrap already validated, ascending observations.
    pub fn new(
        date_column: impl Into<String>,
        value_column: impl Into<String>,
        points: Vec<Observation>,
        interval: Interval,
        spacing_consistent: bool,
    ) -> Self {
        Self {
            date_column: date_column.into(),
            value_column: value_column.into(),
            points,
            interval,
            spacing_consistent,
        }
    }

    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    pub fn points(&self) -> &[Observation] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Whether every gap between observations matched the interval.
    pub fn spacing_consistent(&self) -> bool {
        self.spacing_consistent
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.points.iter().map(|p| p.timestamp).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.points.last().map(|p| p.timestamp)
    }

    /// Express the series as a two-column table (date, value).
    ///
    /// Timestamps are written as `%Y-%m-%d` when every point falls on
    /// midnight, otherwise as `%Y-%m-%d %H:%M:%S` plus any fraction of a
    /// second, so the builder reads back the same instants.
    pub fn to_table(&self) -> Result<Table> {
        let date_only = self.points.iter().all(|p| {
            p.timestamp.time().num_seconds_from_midnight() == 0 && p.timestamp.nanosecond() == 0
        });
        let format = if date_only { "%Y-%m-%d" } else { "%Y-%m-%d %H:%M:%S%.f" };

        let dates = self
            .points
            .iter()
            .map(|p| Some(p.timestamp.format(format).to_string()))
            .collect();
        let values = self
            .points
            .iter()
            .map(|p| Some(p.value.to_string()))
            .collect();

        Table::new(vec![
            Column::new(self.date_column.clone(), CellType::DateTime, dates),
            Column::new(self.value_column.clone(), CellType::Float, values),
        ])
    }
}
