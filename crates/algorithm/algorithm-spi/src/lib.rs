//! Algorithm Service Provider Interface
//!
//! Defines core traits and error types for time series prediction algorithms.
//!
//! This crate provides the foundational abstractions that all algorithm
//! implementations must adhere to:
//!
//! - [`Predictor`]: Fit/predict over an evenly spaced series
//! - [`TimeIndexedPredictor`]: Fit/predict over explicit time positions
//! - [`FittedValues`]: In-sample fitted values for diagnostics
//! - [`TsError`]: Standardized error type for all algorithm operations
//! - [`Result`]: Convenient result type alias

pub mod contract;
pub mod error;

// Re-export all public items at crate root for convenience
pub use contract::{FittedValues, Predictor, TimeIndexedPredictor};
pub use error::{Result, TsError};
