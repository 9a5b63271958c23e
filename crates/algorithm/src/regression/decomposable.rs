//! Decomposable trend + seasonality regression
//!
//! Models a series as
//!
//! ```text
//! y(t) = g(t) + s(t) + ε
//! g(t) = m + k·t + Σ_j δ_j · (t − s_j)₊          piecewise-linear trend
//! s(t) = Σ_n a_n sin(2πnt/P) + b_n cos(2πnt/P)    Fourier seasonality
//! ```
//!
//! Potential changepoints `s_j` are spread uniformly over the first part of
//! the history. The rate adjustments `δ_j` and the Fourier coefficients are
//! shrunk towards zero with Gaussian priors, which turns the MAP estimate
//! into a ridge-penalised least squares problem.
//!
//! Time is an arbitrary continuous axis (for calendar data, days since an
//! epoch), so the model can be evaluated anywhere: inside the history,
//! beyond it, or on an uneven grid.

use crate::utils::linalg::ridge_least_squares;
use crate::{FittedValues, Predictor, Result, TimeIndexedPredictor, TsError};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Penalty applied to the unregularised trend base, for numerical stability only
const BASE_PENALTY: f64 = 1e-10;

/// Whether a seasonal component takes part in the fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeasonalityMode {
    /// Enabled when the history covers at least two full cycles
    Auto,
    /// Always fitted
    Enabled,
    /// Never fitted
    Disabled,
}

/// Configuration for [`DecomposableModel`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecomposableConfig {
    /// Maximum number of potential trend changepoints
    pub n_changepoints: usize,
    /// Share of the history in which changepoints are placed
    pub changepoint_range: f64,
    /// Prior scale of the changepoint rate adjustments (smaller = stiffer trend)
    pub changepoint_prior_scale: f64,
    /// Prior scale of the Fourier coefficients
    pub seasonality_prior_scale: f64,
    /// Assumed observation noise, in units of the scaled series
    pub noise_scale: f64,
    /// Yearly seasonality mode
    pub yearly_seasonality: SeasonalityMode,
    /// Length of one seasonal cycle in time units
    pub yearly_period: f64,
    /// Number of Fourier pairs for the yearly component
    pub yearly_order: usize,
}

impl Default for DecomposableConfig {
    fn default() -> Self {
        Self {
            n_changepoints: 25,
            changepoint_range: 0.8,
            changepoint_prior_scale: 0.05,
            seasonality_prior_scale: 10.0,
            noise_scale: 0.05,
            yearly_seasonality: SeasonalityMode::Auto,
            yearly_period: 365.25,
            yearly_order: 10,
        }
    }
}

impl DecomposableConfig {
    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if !(self.changepoint_range > 0.0 && self.changepoint_range <= 1.0) {
            return Err(TsError::invalid_parameter(
                "changepoint_range",
                "must be in (0, 1]",
            ));
        }
        for (name, value) in [
            ("changepoint_prior_scale", self.changepoint_prior_scale),
            ("seasonality_prior_scale", self.seasonality_prior_scale),
            ("noise_scale", self.noise_scale),
            ("yearly_period", self.yearly_period),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(TsError::invalid_parameter(name, "must be positive"));
            }
        }
        if self.yearly_order == 0 && self.yearly_seasonality == SeasonalityMode::Enabled {
            return Err(TsError::invalid_parameter(
                "yearly_order",
                "must be at least 1 when yearly seasonality is enabled",
            ));
        }
        Ok(())
    }
}

/// Piecewise-linear trend with Fourier seasonality
///
/// # Example
///
/// ```rust
/// use algorithm::regression::{DecomposableConfig, DecomposableModel};
/// use algorithm::TimeIndexedPredictor;
///
/// // Daily observations with a linear trend
/// let times: Vec<f64> = (0..60).map(|d| d as f64).collect();
/// let values: Vec<f64> = times.iter().map(|t| 5.0 + 0.5 * t).collect();
///
/// let mut model = DecomposableModel::new(DecomposableConfig::default()).unwrap();
/// model.fit_at(&times, &values).unwrap();
/// let ahead = model.predict_at(&[70.0]).unwrap();
/// assert!((ahead[0] - 40.0).abs() < 0.1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecomposableModel {
    config: DecomposableConfig,
    /// First observed time
    t_start: f64,
    /// Span of the history, used to scale time to [0, 1]
    t_scale: f64,
    /// Maximum absolute observed value
    y_scale: f64,
    /// Changepoint positions on the scaled time axis
    changepoints: Vec<f64>,
    /// Whether the yearly component took part in the fit
    yearly: bool,
    /// `[m, k, δ_1..δ_c, a_1, b_1, .., a_N, b_N]` on the scaled axes
    coefficients: Vec<f64>,
    /// In-sample fitted values
    fitted_values: Vec<f64>,
    /// Number of observations used in fitting
    n_observations: usize,
    /// Whether model has been fitted
    fitted: bool,
}

impl DecomposableModel {
    /// Create an unfitted model
    pub fn new(config: DecomposableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            t_start: 0.0,
            t_scale: 1.0,
            y_scale: 1.0,
            changepoints: Vec::new(),
            yearly: false,
            coefficients: Vec::new(),
            fitted_values: Vec::new(),
            n_observations: 0,
            fitted: false,
        })
    }

    /// Changepoint positions on the caller's time axis
    pub fn changepoints(&self) -> Vec<f64> {
        self.changepoints
            .iter()
            .map(|s| self.t_start + s * self.t_scale)
            .collect()
    }

    /// Whether the fitted model carries a yearly component
    pub fn has_yearly_seasonality(&self) -> bool {
        self.yearly
    }

    fn n_fourier_terms(&self) -> usize {
        if self.yearly {
            2 * self.config.yearly_order
        } else {
            0
        }
    }

    fn design_row(&self, t_raw: f64) -> Vec<f64> {
        let t = (t_raw - self.t_start) / self.t_scale;
        let mut row = Vec::with_capacity(2 + self.changepoints.len() + self.n_fourier_terms());

        row.push(1.0);
        row.push(t);
        row.extend(self.changepoints.iter().map(|s| (t - s).max(0.0)));

        if self.yearly {
            for order in 1..=self.config.yearly_order {
                let x = TAU * order as f64 * t_raw / self.config.yearly_period;
                row.push(x.sin());
                row.push(x.cos());
            }
        }
        row
    }

    fn penalties(&self) -> Vec<f64> {
        let cp_penalty = (self.config.noise_scale / self.config.changepoint_prior_scale).powi(2);
        let season_penalty =
            (self.config.noise_scale / self.config.seasonality_prior_scale).powi(2);

        let mut penalties = vec![BASE_PENALTY, BASE_PENALTY];
        penalties.extend(std::iter::repeat(cp_penalty).take(self.changepoints.len()));
        penalties.extend(std::iter::repeat(season_penalty).take(self.n_fourier_terms()));
        penalties
    }

    /// Sum the contribution of the coefficient columns in `columns`
    fn evaluate(&self, times: &[f64], columns: std::ops::Range<usize>) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(TsError::NotFitted);
        }
        TsError::check_finite(times)?;

        Ok(times
            .iter()
            .map(|&t| {
                let row = self.design_row(t);
                let scaled: f64 = columns
                    .clone()
                    .map(|j| row[j] * self.coefficients[j])
                    .sum();
                scaled * self.y_scale
            })
            .collect())
    }

    /// Uniformly spaced changepoints over the first `changepoint_range` of
    /// the observations, expressed on the scaled time axis
    fn place_changepoints(&self, times: &[f64]) -> Vec<f64> {
        let hist_size = (times.len() as f64 * self.config.changepoint_range).floor() as usize;
        let n_cp = self.config.n_changepoints.min(hist_size.saturating_sub(1));
        if n_cp == 0 {
            return Vec::new();
        }

        let last = (hist_size - 1) as f64;
        (1..=n_cp)
            .map(|i| {
                let idx = (i as f64 * last / n_cp as f64).round() as usize;
                (times[idx] - self.t_start) / self.t_scale
            })
            .collect()
    }
}

impl TimeIndexedPredictor for DecomposableModel {
    fn fit_at(&mut self, times: &[f64], values: &[f64]) -> Result<()> {
        if times.len() != values.len() {
            return Err(TsError::InvalidData(format!(
                "{} time positions for {} values",
                times.len(),
                values.len()
            )));
        }
        if values.len() < 2 {
            return Err(TsError::InsufficientData {
                required: 2,
                actual: values.len(),
            });
        }
        TsError::check_finite(times)?;
        TsError::check_finite(values)?;
        if times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(TsError::InvalidData(
                "time positions must be strictly increasing".to_string(),
            ));
        }

        self.fitted = false;
        self.t_start = times[0];
        self.t_scale = times[times.len() - 1] - times[0];

        let max_abs = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        self.y_scale = if max_abs > 1e-12 { max_abs } else { 1.0 };

        self.yearly = match self.config.yearly_seasonality {
            SeasonalityMode::Enabled => true,
            SeasonalityMode::Disabled => false,
            SeasonalityMode::Auto => {
                self.config.yearly_order > 0 && self.t_scale >= 2.0 * self.config.yearly_period
            }
        };
        self.changepoints = self.place_changepoints(times);

        let rows: Vec<Vec<f64>> = times.iter().map(|&t| self.design_row(t)).collect();
        let scaled: Vec<f64> = values.iter().map(|v| v / self.y_scale).collect();
        self.coefficients = ridge_least_squares(&rows, &scaled, &self.penalties())?;

        self.n_observations = values.len();
        self.fitted = true;
        self.fitted_values = self.predict_at(times)?;

        tracing::debug!(
            observations = self.n_observations,
            changepoints = self.changepoints.len(),
            yearly = self.yearly,
            "decomposable model fitted"
        );
        Ok(())
    }

    fn predict_at(&self, times: &[f64]) -> Result<Vec<f64>> {
        self.evaluate(times, 0..self.coefficients.len())
    }
}

/// Index-based use: observation `i` sits at time `i`, so `yearly_period`
/// must be expressed in observations (e.g. 12 for monthly data).
impl Predictor for DecomposableModel {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        let times: Vec<f64> = (0..data.len()).map(|i| i as f64).collect();
        self.fit_at(&times, data)
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(TsError::NotFitted);
        }
        let times: Vec<f64> = (self.n_observations..self.n_observations + steps)
            .map(|i| i as f64)
            .collect();
        self.predict_at(&times)
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}

impl FittedValues for DecomposableModel {
    fn fitted_values(&self) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(TsError::NotFitted);
        }
        Ok(self.fitted_values.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::metrics::rmse;

    const MONTH: f64 = 365.25 / 12.0;

    fn no_seasonality() -> DecomposableConfig {
        DecomposableConfig {
            yearly_seasonality: SeasonalityMode::Disabled,
            ..DecomposableConfig::default()
        }
    }

    #[test]
    fn test_linear_trend_is_recovered() {
        let times: Vec<f64> = (0..50).map(|d| d as f64).collect();
        let values: Vec<f64> = times.iter().map(|t| 10.0 + 2.0 * t).collect();

        let mut model = DecomposableModel::new(no_seasonality()).unwrap();
        model.fit_at(&times, &values).unwrap();

        let ahead = model.predict_at(&[60.0, 70.0]).unwrap();
        assert!((ahead[0] - 130.0).abs() < 1e-3);
        assert!((ahead[1] - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_trend_change_is_followed() {
        // Slope 1 for 50 days, then slope 3.
        let times: Vec<f64> = (0..100).map(|d| d as f64).collect();
        let values: Vec<f64> = times
            .iter()
            .map(|&t| if t < 50.0 { 50.0 + t } else { 100.0 + 3.0 * (t - 50.0) })
            .collect();

        let mut model = DecomposableModel::new(no_seasonality()).unwrap();
        model.fit_at(&times, &values).unwrap();

        let ahead = model.predict_at(&[110.0, 120.0]).unwrap();
        let slope = (ahead[1] - ahead[0]) / 10.0;
        assert!(slope > 2.0 && slope < 3.5, "slope was {}", slope);
    }

    #[test]
    fn test_yearly_seasonality_on_monthly_data() {
        let times: Vec<f64> = (0..48).map(|i| i as f64 * MONTH).collect();
        let values: Vec<f64> = times
            .iter()
            .map(|&t| 100.0 + 0.05 * t + 10.0 * (TAU * t / 365.25).sin())
            .collect();

        let mut model = DecomposableModel::new(DecomposableConfig::default()).unwrap();
        model.fit_at(&times, &values).unwrap();
        assert!(model.has_yearly_seasonality());

        let fitted = model.fitted_values().unwrap();
        assert!(rmse(&values, &fitted) < 1.0);

        let future: Vec<f64> = (48..60).map(|i| i as f64 * MONTH).collect();
        let expected: Vec<f64> = future
            .iter()
            .map(|&t| 100.0 + 0.05 * t + 10.0 * (TAU * t / 365.25).sin())
            .collect();
        let predicted = model.predict_at(&future).unwrap();
        assert!(rmse(&expected, &predicted) < 2.0);
    }

    #[test]
    fn test_auto_seasonality_needs_two_years() {
        let times: Vec<f64> = (0..24).map(|i| i as f64 * MONTH).collect();
        let values: Vec<f64> = (0..24).map(|i| 10.0 + i as f64).collect();

        let mut model = DecomposableModel::new(DecomposableConfig::default()).unwrap();
        model.fit_at(&times, &values).unwrap();
        assert!(!model.has_yearly_seasonality());
        let n_trend = 2 + model.changepoints.len();
        assert_eq!(model.coefficients.len(), n_trend);
    }

    #[test]
    fn test_changepoint_placement() {
        let mut model = DecomposableModel::new(no_seasonality()).unwrap();

        let times: Vec<f64> = (0..24).map(|i| i as f64).collect();
        model.fit_at(&times, &times).unwrap();
        let cps = model.changepoints();
        // floor(24 * 0.8) = 19 candidate points, so 18 changepoints
        assert_eq!(cps.len(), 18);
        assert!((cps[0] - 1.0).abs() < 1e-9);
        assert!((cps[17] - 18.0).abs() < 1e-9);

        let times: Vec<f64> = (0..200).map(|i| i as f64).collect();
        model.fit_at(&times, &times).unwrap();
        let cps = model.changepoints();
        assert_eq!(cps.len(), 25);
        assert!(cps.iter().all(|&c| c <= 159.0));
    }

    #[test]
    fn test_trend_plus_seasonal_equals_prediction() {
        let times: Vec<f64> = (0..36).map(|i| i as f64 * MONTH).collect();
        let values: Vec<f64> = times
            .iter()
            .map(|&t| 50.0 + 5.0 * (TAU * t / 365.25).cos())
            .collect();
        let config = DecomposableConfig {
            yearly_seasonality: SeasonalityMode::Enabled,
            ..DecomposableConfig::default()
        };

        let mut model = DecomposableModel::new(config).unwrap();
        model.fit_at(&times, &values).unwrap();

        let at = [400.0, 1200.0];
        let total = model.predict_at(&at).unwrap();
        let n_trend = 2 + model.changepoints.len();
        let trend = model.evaluate(&at, 0..n_trend).unwrap();
        let seasonal = model.evaluate(&at, n_trend..model.coefficients.len()).unwrap();
        for i in 0..at.len() {
            assert!((total[i] - trend[i] - seasonal[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_predictor_index_based_use() {
        let data: Vec<f64> = (0..30).map(|i| 3.0 * i as f64).collect();
        let mut model = DecomposableModel::new(no_seasonality()).unwrap();
        model.fit(&data).unwrap();

        let forecast = model.predict(5).unwrap();
        assert_eq!(forecast.len(), 5);
        assert!((forecast[0] - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_input_validation() {
        let mut model = DecomposableModel::new(DecomposableConfig::default()).unwrap();
        assert!(matches!(
            model.fit_at(&[0.0, 1.0], &[1.0]),
            Err(TsError::InvalidData(_))
        ));
        assert!(matches!(
            model.fit_at(&[0.0], &[1.0]),
            Err(TsError::InsufficientData { required: 2, actual: 1 })
        ));
        assert!(matches!(
            model.fit_at(&[0.0, 2.0, 1.0], &[1.0, 2.0, 3.0]),
            Err(TsError::InvalidData(_))
        ));
        assert!(matches!(
            model.fit_at(&[0.0, 1.0], &[1.0, f64::NAN]),
            Err(TsError::InvalidData(_))
        ));
    }

    #[test]
    fn test_predict_before_fit() {
        let model = DecomposableModel::new(DecomposableConfig::default()).unwrap();
        assert_eq!(model.predict_at(&[1.0]), Err(TsError::NotFitted));
        assert_eq!(model.fitted_values(), Err(TsError::NotFitted));
    }

    #[test]
    fn test_invalid_config() {
        let config = DecomposableConfig {
            changepoint_range: 1.5,
            ..DecomposableConfig::default()
        };
        assert!(DecomposableModel::new(config).is_err());

        let config = DecomposableConfig {
            changepoint_prior_scale: 0.0,
            ..DecomposableConfig::default()
        };
        assert!(DecomposableModel::new(config).is_err());
    }

    #[test]
    fn test_constant_zero_series() {
        let times: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let mut model = DecomposableModel::new(no_seasonality()).unwrap();
        model.fit_at(&times, &[0.0; 10]).unwrap();
        let predicted = model.predict_at(&[20.0]).unwrap();
        assert!(predicted[0].abs() < 1e-9);
    }
}
