//! Forecast request record

use serde::Serialize;

use crate::error::{ForecastError, Result};
use crate::model::ModelChoice;

/// Smallest accepted horizon, in months
pub const MIN_HORIZON: usize = 1;
/// Largest accepted horizon, in months
pub const MAX_HORIZON: usize = 24;
/// Horizon used when the caller does not choose one
pub const DEFAULT_HORIZON: usize = 12;

/// Check that `horizon` lies in `[MIN_HORIZON, MAX_HORIZON]`.
pub fn validate_horizon(horizon: usize) -> Result<usize> {
    if (MIN_HORIZON..=MAX_HORIZON).contains(&horizon) {
        Ok(horizon)
    } else {
        Err(ForecastError::invalid_request(
            "horizon",
            format!("must be between {} and {}, got {}", MIN_HORIZON, MAX_HORIZON, horizon),
        ))
    }
}

/// Everything the user chose for one forecast.
///
/// Immutable once built; passed by reference through every step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastRequest {
    date_column: String,
    value_column: String,
    model: ModelChoice,
    horizon: usize,
}

impl ForecastRequest {
    pub fn new(
        date_column: impl Into<String>,
        value_column: impl Into<String>,
        model: ModelChoice,
        horizon: usize,
    ) -> Result<Self> {
        let date_column = date_column.into();
        let value_column = value_column.into();
        if date_column.trim().is_empty() {
            return Err(ForecastError::invalid_request("date_column", "must not be empty"));
        }
        if value_column.trim().is_empty() {
            return Err(ForecastError::invalid_request("value_column", "must not be empty"));
        }

        Ok(Self {
            date_column,
            value_column,
            model,
            horizon: validate_horizon(horizon)?,
        })
    }

    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    pub fn value_column(&self) -> &str {
        &self.value_column
    }

    pub fn model(&self) -> ModelChoice {
        self.model
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }
}
