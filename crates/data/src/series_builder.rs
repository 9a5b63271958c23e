//! Series builder
//!
//! Turns a table plus a chosen (date, value) column pair into a
//! [`TimeSeries`]: every date cell is parsed strictly, rows with a missing
//! value are dropped, observations are ordered by timestamp, duplicate
//! timestamps are handled by policy, and the observed spacing is checked
//! against the declared interval.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use data_spi::{ColumnRole, DataError, Interval, Observation, Result, Table, TimeSeries};

use crate::dates;

/// What to do with two rows sharing a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail with [`DataError::DuplicateTimestamp`]
    #[default]
    Reject,
    /// Average the values observed at the same timestamp
    Mean,
}

/// What to do when observed gaps do not match the declared interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacingPolicy {
    /// Log a warning and mark the series as inconsistently spaced
    #[default]
    Warn,
    /// Fail with [`DataError::IrregularSpacing`]
    Strict,
}

/// Options for [`SeriesBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    pub interval: Interval,
    pub duplicates: DuplicatePolicy,
    pub spacing: SpacingPolicy,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            interval: Interval::Monthly,
            duplicates: DuplicatePolicy::default(),
            spacing: SpacingPolicy::default(),
        }
    }
}

/// Builds time series from tables.
#[derive(Debug, Clone, Default)]
pub struct SeriesBuilder {
    options: BuildOptions,
}

impl SeriesBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Build the series for `date_column` × `value_column`.
    ///
    /// Every cell of the date column must parse, including cells on rows
    /// whose value is missing. Reported row numbers are 1-based data rows.
    pub fn build(
        &self,
        table: &Table,
        date_column: &str,
        value_column: &str,
    ) -> Result<TimeSeries> {
        let dates = table
            .column(date_column)
            .ok_or_else(|| DataError::ColumnNotFound(date_column.to_string()))?;
        if dates.role() != ColumnRole::DateLike {
            return Err(DataError::WrongColumnRole {
                column: date_column.to_string(),
                expected: ColumnRole::DateLike,
            });
        }

        let values = table
            .column(value_column)
            .ok_or_else(|| DataError::ColumnNotFound(value_column.to_string()))?;
        if values.role() != ColumnRole::Numeric {
            return Err(DataError::WrongColumnRole {
                column: value_column.to_string(),
                expected: ColumnRole::Numeric,
            });
        }

        let mut timestamps = Vec::with_capacity(table.n_rows());
        for row in 0..table.n_rows() {
            let raw = dates.get(row).unwrap_or("");
            let ts = dates::parse_timestamp(raw).map_err(|reason| DataError::DateParse {
                column: date_column.to_string(),
                row: row + 1,
                value: raw.to_string(),
                reason: reason.to_string(),
            })?;
            timestamps.push(ts);
        }

        let mut points: Vec<Observation> = timestamps
            .into_iter()
            .enumerate()
            .filter_map(|(row, ts)| values.numeric(row).map(|v| Observation::new(ts, v)))
            .collect();
        points.sort_by_key(|p| p.timestamp);

        let points = self.resolve_duplicates(points, date_column)?;
        let spacing_consistent = self.check_spacing(&points)?;

        tracing::info!(
            date_column,
            value_column,
            rows = table.n_rows(),
            points = points.len(),
            interval = %self.options.interval,
            spacing_consistent,
            "series built"
        );

        Ok(TimeSeries::new(
            date_column,
            value_column,
            points,
            self.options.interval,
            spacing_consistent,
        ))
    }

    /// `points` must be sorted by timestamp.
    fn resolve_duplicates(
        &self,
        points: Vec<Observation>,
        column: &str,
    ) -> Result<Vec<Observation>> {
        match self.options.duplicates {
            DuplicatePolicy::Reject => {
                if let Some(pair) = points.windows(2).find(|w| w[0].timestamp == w[1].timestamp) {
                    return Err(DataError::DuplicateTimestamp {
                        column: column.to_string(),
                        timestamp: pair[0].timestamp.to_string(),
                    });
                }
                Ok(points)
            }
            DuplicatePolicy::Mean => {
                let mut merged: Vec<(NaiveDateTime, f64, usize)> = Vec::with_capacity(points.len());
                for p in points {
                    match merged.last_mut() {
                        Some((ts, sum, count)) if *ts == p.timestamp => {
                            *sum += p.value;
                            *count += 1;
                        }
                        _ => merged.push((p.timestamp, p.value, 1)),
                    }
                }
                Ok(merged
                    .into_iter()
                    .map(|(ts, sum, count)| Observation::new(ts, sum / count as f64))
                    .collect())
            }
        }
    }

    fn check_spacing(&self, points: &[Observation]) -> Result<bool> {
        let interval = self.options.interval;
        let mut irregular = points.windows(2).filter_map(|w| {
            let days = (w[1].timestamp - w[0].timestamp).num_days();
            (!interval.accepts_gap(days)).then_some((w[0].timestamp, w[1].timestamp, days))
        });

        let Some((from, to, days)) = irregular.next() else {
            return Ok(true);
        };

        match self.options.spacing {
            SpacingPolicy::Strict => Err(DataError::IrregularSpacing {
                interval,
                from: from.to_string(),
                to: to.to_string(),
                days,
            }),
            SpacingPolicy::Warn => {
                let remaining = irregular.count();
                tracing::warn!(
                    %interval,
                    %from,
                    %to,
                    days,
                    more = remaining,
                    "observed spacing does not match the declared interval"
                );
                Ok(false)
            }
        }
    }
}

/// Build with default options (monthly, reject duplicates, warn on spacing).
pub fn build_series(table: &Table, date_column: &str, value_column: &str) -> Result<TimeSeries> {
    SeriesBuilder::default().build(table, date_column, value_column)
}
