//! Forecasting model selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// The two forecasting procedures offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelChoice {
    /// Additive trend + additive seasonal exponential smoothing, 12-period cycle
    #[serde(rename = "Holt-Winters")]
    HoltWinters,
    /// Decomposable piecewise trend + Fourier seasonality regression
    #[serde(rename = "Prophet")]
    Prophet,
}

impl ModelChoice {
    /// Every choice, in the order offered to the user.
    pub const ALL: [ModelChoice; 2] = [ModelChoice::HoltWinters, ModelChoice::Prophet];

    /// Display label, also the accepted token.
    pub fn label(&self) -> &'static str {
        match self {
            ModelChoice::HoltWinters => "Holt-Winters",
            ModelChoice::Prophet => "Prophet",
        }
    }
}

impl Default for ModelChoice {
    fn default() -> Self {
        ModelChoice::HoltWinters
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelChoice {
    type Err = ForecastError;

    /// Accepts the labels case-insensitively, plus the short forms
    /// `hw`, `holt_winters` and `trend`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        match token.as_str() {
            "holt-winters" | "holtwinters" | "hw" => Ok(ModelChoice::HoltWinters),
            "prophet" | "trend" => Ok(ModelChoice::Prophet),
            _ => Err(ForecastError::UnknownModel(s.to_string())),
        }
    }
}
