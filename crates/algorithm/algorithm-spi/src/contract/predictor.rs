//! Predictor traits for time series algorithms
//!
//! Defines the core trait interfaces that all prediction algorithms must implement.

use crate::error::Result;

/// Common trait for all time series predictors
///
/// This trait defines the core interface that all prediction algorithms
/// must implement. It follows a fit-predict pattern common in statistical
/// and machine learning libraries. Observations are assumed to be evenly
/// spaced; step `h` of a forecast is `h` periods after the last observation.
///
/// # Example
///
/// ```rust,ignore
/// use algorithm_spi::Predictor;
///
/// fn forecast<P: Predictor>(predictor: &mut P, data: &[f64], horizon: usize) -> algorithm_spi::Result<Vec<f64>> {
///     predictor.fit(data)?;
///     predictor.predict(horizon)
/// }
/// ```
pub trait Predictor {
    /// Fit the model to historical data
    ///
    /// # Arguments
    ///
    /// * `data` - Historical time series data
    ///
    /// # Returns
    ///
    /// `Ok(())` if fitting succeeds, `Err(TsError)` otherwise
    fn fit(&mut self, data: &[f64]) -> Result<()>;

    /// Predict future values
    ///
    /// # Arguments
    ///
    /// * `steps` - Number of future time steps to predict
    ///
    /// # Returns
    ///
    /// Vector of predicted values, or an error if prediction fails
    fn predict(&self, steps: usize) -> Result<Vec<f64>>;

    /// Check if the model has been fitted
    fn is_fitted(&self) -> bool;
}

/// Predictors that model time explicitly
///
/// Observations are paired with a position on a continuous time axis
/// (for example days since an epoch), so gaps and uneven spacing are
/// represented faithfully. Predictions can be requested at any position,
/// including inside the fitted history.
pub trait TimeIndexedPredictor {
    /// Fit the model to `values` observed at `times`
    ///
    /// `times` and `values` must have the same length and `times` must be
    /// strictly increasing.
    fn fit_at(&mut self, times: &[f64], values: &[f64]) -> Result<()>;

    /// Predict the model value at each of `times`
    fn predict_at(&self, times: &[f64]) -> Result<Vec<f64>>;
}

/// Models that expose their in-sample fitted values
///
/// For recursive models this is the one-step-ahead prediction for each
/// observation; for regression models it is the fitted curve. Values that
/// the model cannot produce (e.g. during initialisation) are `NaN`.
pub trait FittedValues {
    /// Fitted values aligned with the training observations
    fn fitted_values(&self) -> Result<Vec<f64>>;
}
