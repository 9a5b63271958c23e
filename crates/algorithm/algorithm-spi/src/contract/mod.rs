//! Contract traits for algorithm implementations
//!
//! - [`Predictor`]: The primary trait for time series prediction
//! - [`TimeIndexedPredictor`]: Prediction at arbitrary time positions
//! - [`FittedValues`]: Access to in-sample fitted values

mod predictor;

pub use predictor::{FittedValues, Predictor, TimeIndexedPredictor};
