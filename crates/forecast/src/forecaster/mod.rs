//! Forecasting strategies
//!
//! One [`SeriesForecaster`] per [`ModelChoice`]. Each turns a prepared
//! [`TimeSeries`] into a [`ForecastResult`] covering the history and the
//! requested horizon.

mod holt_winters;
mod trend_seasonal;

pub use holt_winters::HoltWintersForecaster;
pub use trend_seasonal::TrendSeasonalForecaster;

use chrono::NaiveDateTime;
use data::TimeSeries;

use crate::error::{ForecastError, Result};
use crate::model::ModelChoice;
use crate::result::ForecastResult;

/// A forecasting procedure applied to a whole series
pub trait SeriesForecaster: Send + Sync {
    /// Which user-facing choice this forecaster implements
    fn model(&self) -> ModelChoice;

    /// Fit on `series` and forecast `horizon` periods past its end
    fn forecast(&self, series: &TimeSeries, horizon: usize) -> Result<ForecastResult>;
}

/// `horizon` timestamps following the last observation, one interval apart.
pub(crate) fn future_timestamps(series: &TimeSeries, horizon: usize) -> Result<Vec<NaiveDateTime>> {
    let last = series
        .last_timestamp()
        .ok_or_else(|| ForecastError::Timeline("series is empty".to_string()))?;
    let interval = series.interval();

    (1..=horizon)
        .map(|step| {
            interval.advance(last, step as u32).ok_or_else(|| {
                ForecastError::Timeline(format!("{} + {} {} is out of range", last, step, interval))
            })
        })
        .collect()
}
