//! In-sample accuracy metrics
//!
//! Pairs where either side is not finite are ignored, so fitted-value
//! vectors that carry `NaN` during model initialisation can be passed
//! directly.

use serde::{Deserialize, Serialize};

fn finite_pairs<'a>(
    actual: &'a [f64],
    predicted: &'a [f64],
) -> impl Iterator<Item = (f64, f64)> + 'a {
    actual
        .iter()
        .zip(predicted.iter())
        .filter(|(a, p)| a.is_finite() && p.is_finite())
        .map(|(a, p)| (*a, *p))
}

/// Mean Absolute Error (MAE)
///
/// Average of absolute differences between predictions and actual values.
/// Lower is better. Same scale as the data. `NaN` when there is nothing to
/// compare.
///
/// # Example
///
/// ```rust
/// use algorithm::utils::metrics::mae;
///
/// let actual = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let predicted = vec![1.1, 2.2, 2.9, 4.1, 5.0];
/// let error = mae(&actual, &predicted);
/// assert!((error - 0.1).abs() < 1e-9);
/// ```
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() {
        return f64::NAN;
    }

    let (sum, count) = finite_pairs(actual, predicted)
        .fold((0.0, 0usize), |(sum, count), (a, p)| (sum + (a - p).abs(), count + 1));

    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Mean Squared Error (MSE)
///
/// Average of squared differences. Penalizes large errors more heavily.
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() {
        return f64::NAN;
    }

    let (sum, count) = finite_pairs(actual, predicted)
        .fold((0.0, 0usize), |(sum, count), (a, p)| (sum + (a - p).powi(2), count + 1));

    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Root Mean Squared Error (RMSE)
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}

/// Accuracy metrics reported alongside a forecast
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub mae: f64,
    pub rmse: f64,
    /// Number of observation pairs that entered the metrics
    pub observations: usize,
}

impl MetricsSummary {
    /// Compute all metrics for a set of fitted values
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Self {
        let observations = if actual.len() == predicted.len() {
            finite_pairs(actual, predicted).count()
        } else {
            0
        };
        Self {
            mae: mae(actual, predicted),
            rmse: rmse(actual, predicted),
            observations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mae_and_rmse() {
        let actual = [1.0, 2.0, 3.0, 4.0];
        let predicted = [1.0, 3.0, 3.0, 2.0];
        assert!((mae(&actual, &predicted) - 0.75).abs() < 1e-12);
        assert!((rmse(&actual, &predicted) - (5.0f64 / 4.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_nan_pairs_are_skipped() {
        let actual = [1.0, 2.0, 3.0];
        let predicted = [f64::NAN, 2.5, 3.5];
        assert!((mae(&actual, &predicted) - 0.5).abs() < 1e-12);

        let summary = MetricsSummary::compute(&actual, &predicted);
        assert_eq!(summary.observations, 2);
    }

    #[test]
    fn test_mismatched_or_empty_inputs() {
        assert!(mae(&[1.0], &[1.0, 2.0]).is_nan());
        assert!(mse(&[], &[]).is_nan());
        assert!(rmse(&[1.0], &[f64::NAN]).is_nan());
        assert_eq!(MetricsSummary::compute(&[1.0], &[]).observations, 0);
    }
}
