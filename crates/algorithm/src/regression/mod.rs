//! Regression-based forecasting models

pub mod decomposable;

pub use decomposable::{DecomposableConfig, DecomposableModel, SeasonalityMode};
