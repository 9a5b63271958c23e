//! Time series prediction algorithms
//!
//! This crate provides the forecasting models behind the forecast studio,
//! organized by category:
//!
//! - [`smoothing`]: Holt-Winters triple exponential smoothing
//! - [`regression`]: Decomposable trend + Fourier seasonality regression
//! - [`utils`]: Metrics and small linear algebra helpers
//!
//! ## Example
//!
//! ```rust
//! use algorithm::prelude::*;
//!
//! let data: Vec<f64> = (0..36)
//!     .map(|i| 100.0 + i as f64 + 10.0 * ((i % 12) as f64 / 12.0 * std::f64::consts::TAU).sin())
//!     .collect();
//! let mut model = HoltWinters::new(0.3, 0.1, 0.2, 12).unwrap();
//! model.fit(&data).unwrap();
//! let forecast = model.predict(6).unwrap();
//! assert_eq!(forecast.len(), 6);
//! ```

pub mod regression;
pub mod smoothing;
pub mod utils;

pub use algorithm_spi::{FittedValues, Predictor, Result, TimeIndexedPredictor, TsError};

// Re-export for convenience
pub use regression::*;
pub use smoothing::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{FittedValues, Predictor, TimeIndexedPredictor};
    // Smoothing
    pub use crate::smoothing::HoltWinters;
    // Regression
    pub use crate::regression::{DecomposableConfig, DecomposableModel, SeasonalityMode};
    // Error types
    pub use crate::{Result, TsError};
}
