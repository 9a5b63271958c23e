//! Triple Exponential Smoothing (Holt-Winters) for time series forecasting
//!
//! Additive trend, additive seasonality:
//!
//! - level:    `L_t = α (Y_t − S_{t−m}) + (1 − α)(L_{t−1} + T_{t−1})`
//! - trend:    `T_t = β (L_t − L_{t−1}) + (1 − β) T_{t−1}`
//! - season:   `S_t = γ (Y_t − L_t) + (1 − γ) S_{t−m}`
//! - forecast: `Ŷ_{n+h} = L_n + h T_n + S_{n+h−m}`
//!
//! ## Choosing Parameters
//!
//! - `alpha` (level): Higher values = more responsive to recent changes
//! - `beta` (trend): Controls trend smoothing
//! - `gamma` (seasonal): Controls seasonal smoothing
//!
//! [`HoltWinters::auto`] picks all three by minimising the in-sample
//! one-step-ahead squared error.

use crate::{FittedValues, Predictor, Result, TsError};
use serde::{Deserialize, Serialize};

/// Coarse search grid for the smoothing parameters
const COARSE_GRID: [f64; 10] = [0.05, 0.15, 0.25, 0.35, 0.45, 0.55, 0.65, 0.75, 0.85, 0.95];
/// Refinement step around the best coarse point
const FINE_STEP: f64 = 0.01;
/// Number of refinement steps on each side of the coarse optimum
const FINE_SPAN: i32 = 5;

/// Triple Exponential Smoothing (Holt-Winters Method)
///
/// Best for: Data with both trend and seasonal patterns
///
/// # Example
///
/// ```rust
/// use algorithm::smoothing::HoltWinters;
/// use algorithm::Predictor;
///
/// // Monthly data with yearly seasonality
/// let data: Vec<f64> = (0..36).map(|i| {
///     100.0 + (i as f64 * 2.0) + 20.0 * ((i as f64 * std::f64::consts::PI / 6.0).sin())
/// }).collect();
///
/// let mut model = HoltWinters::new(0.3, 0.1, 0.2, 12).unwrap();
/// model.fit(&data).unwrap();
/// let forecast = model.predict(12).unwrap();
/// assert_eq!(forecast.len(), 12);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoltWinters {
    /// Level smoothing parameter
    alpha: f64,
    /// Trend smoothing parameter
    beta: f64,
    /// Seasonal smoothing parameter
    gamma: f64,
    /// Seasonal period length
    period: usize,
    /// Current level
    level: f64,
    /// Current trend
    trend: f64,
    /// Seasonal components, indexed by observation position modulo `period`
    seasonal: Vec<f64>,
    /// Number of observations used in fitting
    n_observations: usize,
    /// One-step-ahead in-sample predictions (NaN for the first season)
    fitted_values: Vec<f64>,
    /// Sum of squared one-step-ahead errors
    sse: f64,
    /// Whether model has been fitted
    fitted: bool,
}

/// Final state after running the smoothing recursions over a series
struct SmoothingRun {
    level: f64,
    trend: f64,
    seasonal: Vec<f64>,
    fitted_values: Vec<f64>,
    sse: f64,
}

impl HoltWinters {
    /// Create a new Holt-Winters model
    ///
    /// # Arguments
    ///
    /// * `alpha` - Level smoothing (0 < alpha < 1)
    /// * `beta` - Trend smoothing (0 < beta < 1)
    /// * `gamma` - Seasonal smoothing (0 < gamma < 1)
    /// * `period` - Number of observations per seasonal cycle
    pub fn new(alpha: f64, beta: f64, gamma: f64, period: usize) -> Result<Self> {
        for (name, value) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
            if !(0.0 < value && value < 1.0) {
                return Err(TsError::invalid_parameter(
                    name,
                    "must be between 0 and 1 (exclusive)",
                ));
            }
        }
        if period < 2 {
            return Err(TsError::invalid_parameter("period", "must be at least 2"));
        }

        Ok(Self {
            alpha,
            beta,
            gamma,
            period,
            level: 0.0,
            trend: 0.0,
            seasonal: vec![0.0; period],
            n_observations: 0,
            fitted_values: Vec::new(),
            sse: 0.0,
            fitted: false,
        })
    }

    /// Fit a model whose smoothing parameters are chosen automatically
    ///
    /// Runs a coarse grid over `(alpha, beta, gamma)` followed by a local
    /// refinement around the best point, keeping the combination with the
    /// lowest one-step-ahead SSE.
    pub fn auto(data: &[f64], period: usize) -> Result<Self> {
        let template = Self::new(0.5, 0.5, 0.5, period)?;
        template.check_data(data)?;

        let sse_of = |(alpha, beta, gamma): (f64, f64, f64)| {
            let candidate = Self {
                alpha,
                beta,
                gamma,
                ..template.clone()
            };
            candidate.smooth(data).sse
        };

        let mut best = (0.5, 0.5, 0.5);
        let mut best_sse = f64::MAX;
        for &alpha in &COARSE_GRID {
            for &beta in &COARSE_GRID {
                for &gamma in &COARSE_GRID {
                    let sse = sse_of((alpha, beta, gamma));
                    if sse.is_finite() && sse < best_sse {
                        best_sse = sse;
                        best = (alpha, beta, gamma);
                    }
                }
            }
        }

        let (a0, b0, g0) = best;
        for da in -FINE_SPAN..=FINE_SPAN {
            for db in -FINE_SPAN..=FINE_SPAN {
                for dg in -FINE_SPAN..=FINE_SPAN {
                    let point = (
                        a0 + da as f64 * FINE_STEP,
                        b0 + db as f64 * FINE_STEP,
                        g0 + dg as f64 * FINE_STEP,
                    );
                    if ![point.0, point.1, point.2].iter().all(|v| *v > 0.0 && *v < 1.0) {
                        continue;
                    }
                    let sse = sse_of(point);
                    if sse.is_finite() && sse < best_sse {
                        best_sse = sse;
                        best = point;
                    }
                }
            }
        }

        let (alpha, beta, gamma) = best;
        tracing::debug!(alpha, beta, gamma, sse = best_sse, "holt-winters parameters selected");

        let mut model = Self::new(alpha, beta, gamma, period)?;
        model.fit(data)?;
        Ok(model)
    }

    /// Smoothing parameters `(alpha, beta, gamma)`
    pub fn params(&self) -> (f64, f64, f64) {
        (self.alpha, self.beta, self.gamma)
    }

    /// Seasonal period length
    pub fn period(&self) -> usize {
        self.period
    }

    /// Sum of squared one-step-ahead errors of the last fit
    pub fn sse(&self) -> f64 {
        self.sse
    }

    fn check_data(&self, data: &[f64]) -> Result<()> {
        let min_required = self.period * 2;
        if data.len() < min_required {
            return Err(TsError::InsufficientData {
                required: min_required,
                actual: data.len(),
            });
        }
        TsError::check_finite(data)
    }

    /// Run the recursions over `data` without touching `self`
    ///
    /// `data` must hold at least two full seasons.
    fn smooth(&self, data: &[f64]) -> SmoothingRun {
        let m = self.period;
        let first_avg = data[..m].iter().sum::<f64>() / m as f64;
        let second_avg = data[m..2 * m].iter().sum::<f64>() / m as f64;

        let mut level = first_avg;
        let mut trend = (second_avg - first_avg) / m as f64;
        let mut seasonal: Vec<f64> = data[..m].iter().map(|y| y - first_avg).collect();

        let mut fitted_values = vec![f64::NAN; data.len()];
        let mut sse = 0.0;

        for (i, &value) in data.iter().enumerate().skip(m) {
            let season_idx = i % m;
            let prev_level = level;
            let prev_seasonal = seasonal[season_idx];

            let one_step = level + trend + prev_seasonal;
            fitted_values[i] = one_step;
            sse += (value - one_step).powi(2);

            level = self.alpha * (value - prev_seasonal) + (1.0 - self.alpha) * (level + trend);
            trend = self.beta * (level - prev_level) + (1.0 - self.beta) * trend;
            seasonal[season_idx] =
                self.gamma * (value - level) + (1.0 - self.gamma) * prev_seasonal;
        }

        SmoothingRun {
            level,
            trend,
            seasonal,
            fitted_values,
            sse,
        }
    }
}

impl Predictor for HoltWinters {
    fn fit(&mut self, data: &[f64]) -> Result<()> {
        self.check_data(data)?;

        let run = self.smooth(data);
        self.level = run.level;
        self.trend = run.trend;
        self.seasonal = run.seasonal;
        self.fitted_values = run.fitted_values;
        self.sse = run.sse;
        self.n_observations = data.len();

        self.fitted = true;
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(TsError::NotFitted);
        }

        let forecasts = (1..=steps)
            .map(|h| {
                let season_idx = (self.n_observations + h - 1) % self.period;
                self.level + h as f64 * self.trend + self.seasonal[season_idx]
            })
            .collect();

        Ok(forecasts)
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}

impl FittedValues for HoltWinters {
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

    fn seasonal_series(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                100.0 + t * 2.0 + 20.0 * (t * std::f64::consts::PI / 6.0).sin()
            })
            .collect()
    }

    #[test]
    fn test_holt_winters() {
        let data = seasonal_series(48);
        let mut model = HoltWinters::new(0.3, 0.1, 0.2, 12).unwrap();
        model.fit(&data).unwrap();
        let forecast = model.predict(12).unwrap();
        assert_eq!(forecast.len(), 12);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(HoltWinters::new(0.0, 0.1, 0.1, 12).is_err());
        assert!(HoltWinters::new(0.3, 1.0, 0.1, 12).is_err());
        assert!(HoltWinters::new(0.3, 0.1, -0.1, 12).is_err());
        assert!(HoltWinters::new(0.3, 0.1, 0.1, 1).is_err());
    }

    #[test]
    fn test_requires_two_seasons() {
        let mut model = HoltWinters::new(0.3, 0.1, 0.2, 12).unwrap();
        let err = model.fit(&seasonal_series(23)).unwrap_err();
        assert_eq!(
            err,
            TsError::InsufficientData {
                required: 24,
                actual: 23
            }
        );
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let mut data = seasonal_series(24);
        data[5] = f64::NAN;
        let mut model = HoltWinters::new(0.3, 0.1, 0.2, 12).unwrap();
        assert!(matches!(model.fit(&data), Err(TsError::InvalidData(_))));
    }

    #[test]
    fn test_predict_before_fit() {
        let model = HoltWinters::new(0.3, 0.1, 0.2, 12).unwrap();
        assert_eq!(model.predict(3), Err(TsError::NotFitted));
    }

    #[test]
    fn test_pure_seasonal_pattern_is_reproduced() {
        // Flat level, no trend: a perfectly repeating season.
        let pattern = [5.0, -3.0, 1.0, -3.0];
        let data: Vec<f64> = (0..16).map(|i| 50.0 + pattern[i % 4]).collect();

        let mut model = HoltWinters::new(0.2, 0.1, 0.3, 4).unwrap();
        model.fit(&data).unwrap();
        let forecast = model.predict(4).unwrap();

        for (h, value) in forecast.iter().enumerate() {
            assert!((value - (50.0 + pattern[h])).abs() < 1e-9);
        }
    }

    #[test]
    fn test_forecast_season_continues_from_end_of_history() {
        // 18 observations with period 4: the next observation falls in season 2.
        let pattern = [10.0, 0.0, -10.0, 0.0];
        let data: Vec<f64> = (0..18).map(|i| 100.0 + pattern[i % 4]).collect();

        let mut model = HoltWinters::new(0.2, 0.1, 0.3, 4).unwrap();
        model.fit(&data).unwrap();
        let forecast = model.predict(2).unwrap();

        assert!((forecast[0] - 90.0).abs() < 1e-9);
        assert!((forecast[1] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_fitted_values_are_one_step_ahead() {
        let data = seasonal_series(36);
        let mut model = HoltWinters::new(0.3, 0.1, 0.2, 12).unwrap();
        model.fit(&data).unwrap();

        let fitted = model.fitted_values().unwrap();
        assert_eq!(fitted.len(), 36);
        assert!(fitted[..12].iter().all(|v| v.is_nan()));
        assert!(fitted[12..].iter().all(|v| v.is_finite()));

        let sse: f64 = data[12..]
            .iter()
            .zip(&fitted[12..])
            .map(|(y, f)| (y - f).powi(2))
            .sum();
        assert!((sse - model.sse()).abs() < 1e-9);
    }

    #[test]
    fn test_auto_beats_arbitrary_parameters() {
        let data = seasonal_series(48);
        let auto = HoltWinters::auto(&data, 12).unwrap();

        let mut fixed = HoltWinters::new(0.95, 0.95, 0.95, 12).unwrap();
        fixed.fit(&data).unwrap();

        assert!(auto.is_fitted());
        assert!(auto.sse() <= fixed.sse());
        let (alpha, beta, gamma) = auto.params();
        assert!(alpha > 0.0 && alpha < 1.0);
        assert!(beta > 0.0 && beta < 1.0);
        assert!(gamma > 0.0 && gamma < 1.0);
    }

    #[test]
    fn test_auto_insufficient_data() {
        let result = HoltWinters::auto(&seasonal_series(20), 12);
        assert!(matches!(result, Err(TsError::InsufficientData { .. })));
    }
}
