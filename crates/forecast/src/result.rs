//! Combined history + forecast result

use algorithm::utils::metrics::MetricsSummary;
use chrono::NaiveDateTime;
use data::Interval;
use serde::{Deserialize, Serialize};

use crate::model::ModelChoice;

/// Whether a point was observed or predicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointKind {
    History,
    Forecast,
}

/// A single charted point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
    pub kind: PointKind,
}

/// Parameters the model settled on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FittedParameters {
    HoltWinters {
        alpha: f64,
        beta: f64,
        gamma: f64,
        period: usize,
    },
    TrendSeasonal {
        changepoints: Vec<NaiveDateTime>,
        yearly_seasonality: bool,
    },
}

/// Ordered `(timestamp, value)` sequence covering the history and
/// `horizon` future periods.
///
/// For Holt-Winters the history points are the observed values; for the
/// trend/seasonality model they are the in-sample predictions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub model: ModelChoice,
    pub date_column: String,
    pub value_column: String,
    pub interval: Interval,
    pub history_len: usize,
    pub horizon: usize,
    pub spacing_consistent: bool,
    pub parameters: FittedParameters,
    /// In-sample fit against the observed values
    pub metrics: MetricsSummary,
    pub points: Vec<ForecastPoint>,
}

impl ForecastResult {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.points.iter().map(|p| p.timestamp).collect()
    }

    pub fn history(&self) -> &[ForecastPoint] {
        &self.points[..self.history_len.min(self.points.len())]
    }

    pub fn forecast(&self) -> &[ForecastPoint] {
        &self.points[self.history_len.min(self.points.len())..]
    }
}
