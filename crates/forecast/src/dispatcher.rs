//! Forecast dispatch
//!
//! Routes a prepared series to the forecaster matching the chosen model.
//! Fitting errors propagate to the caller; there is no fallback from one
//! model to the other.

use data::TimeSeries;

use crate::error::Result;
use crate::forecaster::{HoltWintersForecaster, SeriesForecaster, TrendSeasonalForecaster};
use crate::model::ModelChoice;
use crate::request::validate_horizon;
use crate::result::ForecastResult;

/// Forecaster with default settings for `model`.
pub fn forecaster_for(model: ModelChoice) -> Box<dyn SeriesForecaster> {
    match model {
        ModelChoice::HoltWinters => Box::new(HoltWintersForecaster::default()),
        ModelChoice::Prophet => Box::new(TrendSeasonalForecaster::default()),
    }
}

/// Forecast `horizon` periods of `series` with `model`.
///
/// The returned sequence holds `series.len() + horizon` points.
pub fn dispatch(series: &TimeSeries, model: ModelChoice, horizon: usize) -> Result<ForecastResult> {
    let horizon = validate_horizon(horizon)?;
    tracing::debug!(%model, horizon, points = series.len(), "dispatching forecast");

    let result = forecaster_for(model).forecast(series, horizon);
    if let Err(e) = &result {
        tracing::warn!(%model, error = %e, "forecast failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;
    use crate::result::PointKind;
    use chrono::NaiveDate;
    use data::{Interval, Observation};

    fn monthly(n: usize) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let points = (0..n)
            .map(|i| {
                let ts = Interval::Monthly.advance(start, i as u32).unwrap();
                let t = i as f64;
                Observation::new(ts, 50.0 + t + 8.0 * (t * std::f64::consts::TAU / 12.0).cos())
            })
            .collect();
        TimeSeries::new("Month", "Sales", points, Interval::Monthly, true)
    }

    #[test]
    fn test_both_models_return_history_plus_horizon() {
        let series = monthly(30);
        for model in ModelChoice::ALL {
            for horizon in [1, 12, 24] {
                let result = dispatch(&series, model, horizon).unwrap();
                assert_eq!(result.len(), 30 + horizon);
                assert_eq!(result.history_len, 30);
                assert_eq!(result.forecast().len(), horizon);
                assert!(result.forecast().iter().all(|p| p.kind == PointKind::Forecast));
                assert_eq!(result.model, model);
            }
        }
    }

    #[test]
    fn test_forecast_timestamps_continue_monthly() {
        let series = monthly(24);
        let result = dispatch(&series, ModelChoice::Prophet, 2).unwrap();
        let ts = result.timestamps();
        assert_eq!(ts[24].date(), NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(ts[25].date(), NaiveDate::from_ymd_opt(2022, 2, 1).unwrap());
    }

    #[test]
    fn test_horizon_out_of_range() {
        let series = monthly(24);
        assert!(matches!(
            dispatch(&series, ModelChoice::HoltWinters, 0),
            Err(ForecastError::InvalidRequest { .. })
        ));
        assert!(dispatch(&series, ModelChoice::HoltWinters, 25).is_err());
    }

    #[test]
    fn test_fitting_error_propagates() {
        let series = monthly(13);
        assert!(matches!(
            dispatch(&series, ModelChoice::HoltWinters, 12),
            Err(ForecastError::Model(algorithm::TsError::InsufficientData {
                required: 24,
                actual: 13
            }))
        ));

        let single = monthly(1);
        assert!(matches!(
            dispatch(&single, ModelChoice::Prophet, 12),
            Err(ForecastError::Model(_))
        ));
    }
}
