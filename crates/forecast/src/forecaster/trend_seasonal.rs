use algorithm::utils::metrics::MetricsSummary;
use algorithm::{DecomposableConfig, DecomposableModel, TimeIndexedPredictor};
use chrono::{Duration, NaiveDateTime};
use data::TimeSeries;

use super::{future_timestamps, SeriesForecaster};
use crate::error::Result;
use crate::model::ModelChoice;
use crate::result::{FittedParameters, ForecastPoint, ForecastResult, PointKind};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Days since the Unix epoch
fn to_days(ts: NaiveDateTime) -> f64 {
    (ts - NaiveDateTime::default()).num_milliseconds() as f64 / MILLIS_PER_DAY
}

fn from_days(days: f64) -> Option<NaiveDateTime> {
    let millis = (days * MILLIS_PER_DAY).round() as i64;
    NaiveDateTime::default().checked_add_signed(Duration::milliseconds(millis))
}

/// Piecewise-linear trend with yearly Fourier seasonality.
///
/// The model is refit on `(ds, y)` and evaluated over the whole extended
/// timeline, so history points carry the in-sample prediction.
#[derive(Debug, Clone, Default)]
pub struct TrendSeasonalForecaster {
    config: DecomposableConfig,
}

impl TrendSeasonalForecaster {
    pub fn new(config: DecomposableConfig) -> Self {
        Self { config }
    }
}

impl SeriesForecaster for TrendSeasonalForecaster {
    fn model(&self) -> ModelChoice {
        ModelChoice::Prophet
    }

    fn forecast(&self, series: &TimeSeries, horizon: usize) -> Result<ForecastResult> {
        let ds: Vec<f64> = series.timestamps().into_iter().map(to_days).collect();
        let y = series.values();

        let mut model = DecomposableModel::new(self.config.clone())?;
        model.fit_at(&ds, &y)?;

        let future = future_timestamps(series, horizon)?;
        let timeline: Vec<NaiveDateTime> = series.timestamps().into_iter().chain(future).collect();
        let timeline_days: Vec<f64> = timeline.iter().copied().map(to_days).collect();
        let yhat = model.predict_at(&timeline_days)?;

        let history_len = series.len();
        let metrics = MetricsSummary::compute(&y, &yhat[..history_len]);
        let changepoints: Vec<NaiveDateTime> = model
            .changepoints()
            .into_iter()
            .filter_map(from_days)
            .collect();

        tracing::info!(
            changepoints = changepoints.len(),
            yearly = model.has_yearly_seasonality(),
            mae = metrics.mae,
            "trend/seasonality model fitted"
        );

        let points = timeline
            .into_iter()
            .zip(yhat)
            .enumerate()
            .map(|(i, (timestamp, value))| ForecastPoint {
                timestamp,
                value,
                kind: if i < history_len {
                    PointKind::History
                } else {
                    PointKind::Forecast
                },
            })
            .collect();

        Ok(ForecastResult {
            model: self.model(),
            date_column: series.date_column().to_string(),
            value_column: series.value_column().to_string(),
            interval: series.interval(),
            history_len,
            horizon,
            spacing_consistent: series.spacing_consistent(),
            parameters: FittedParameters::TrendSeasonal {
                changepoints,
                yearly_seasonality: model.has_yearly_seasonality(),
            },
            metrics,
            points,
        })
    }
}
