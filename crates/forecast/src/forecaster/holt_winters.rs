use algorithm::utils::metrics::MetricsSummary;
use algorithm::{FittedValues, HoltWinters, Predictor};
use data::TimeSeries;

use super::{future_timestamps, SeriesForecaster};
use crate::error::Result;
use crate::model::ModelChoice;
use crate::result::{FittedParameters, ForecastPoint, ForecastResult, PointKind};

/// Observations per seasonal cycle for monthly data
pub const MONTHLY_PERIOD: usize = 12;

/// Additive Holt-Winters with automatically estimated smoothing parameters.
///
/// The result is the observed history followed by the point forecasts.
#[derive(Debug, Clone)]
pub struct HoltWintersForecaster {
    period: usize,
}

impl HoltWintersForecaster {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Default for HoltWintersForecaster {
    fn default() -> Self {
        Self::new(MONTHLY_PERIOD)
    }
}

impl SeriesForecaster for HoltWintersForecaster {
    fn model(&self) -> ModelChoice {
        ModelChoice::HoltWinters
    }

    fn forecast(&self, series: &TimeSeries, horizon: usize) -> Result<ForecastResult> {
        let values = series.values();
        let model = HoltWinters::auto(&values, self.period)?;
        let predictions = model.predict(horizon)?;
        let metrics = MetricsSummary::compute(&values, &model.fitted_values()?);
        let future = future_timestamps(series, horizon)?;

        let (alpha, beta, gamma) = model.params();
        tracing::info!(
            alpha,
            beta,
            gamma,
            period = model.period(),
            sse = model.sse(),
            mae = metrics.mae,
            "holt-winters fitted"
        );

        let points = series
            .points()
            .iter()
            .map(|p| ForecastPoint {
                timestamp: p.timestamp,
                value: p.value,
                kind: PointKind::History,
            })
            .chain(future.into_iter().zip(predictions).map(|(timestamp, value)| ForecastPoint {
                timestamp,
                value,
                kind: PointKind::Forecast,
            }))
            .collect();

        Ok(ForecastResult {
            model: self.model(),
            date_column: series.date_column().to_string(),
            value_column: series.value_column().to_string(),
            interval: series.interval(),
            history_len: series.len(),
            horizon,
            spacing_consistent: series.spacing_consistent(),
            parameters: FittedParameters::HoltWinters {
                alpha,
                beta,
                gamma,
                period: model.period(),
            },
            metrics,
            points,
        })
    }
}
