//! Forecast dispatch
//!
//! Ties the data and algorithm crates together: a [`ForecastRequest`]
//! names the date column, value column, model and horizon; the
//! [`Pipeline`] classifies the table, builds the series and dispatches to
//! the chosen model; the [`ForecastResult`] holds history and forecast as
//! one ordered sequence ready for charting.
//!
//! # Example
//!
//! ```rust
//! use data::read_csv;
//! use forecast::{forecast_table, ForecastRequest, ModelChoice};
//!
//! let mut csv = String::from("Month,Sales\n");
//! for i in 0..24 {
//!     csv.push_str(&format!("{}-{:02},{}\n", 2022 + i / 12, i % 12 + 1, 100 + i));
//! }
//! let table = read_csv(csv.as_bytes()).unwrap();
//!
//! let request = ForecastRequest::new("Month", "Sales", ModelChoice::HoltWinters, 12).unwrap();
//! let result = forecast_table(&table, &request).unwrap();
//! assert_eq!(result.len(), 36);
//! ```

pub mod dispatcher;
pub mod error;
pub mod forecaster;
pub mod model;
pub mod pipeline;
pub mod request;
pub mod result;

pub use dispatcher::{dispatch, forecaster_for};
pub use error::{ErrorCategory, ForecastError, Result};
pub use forecaster::{HoltWintersForecaster, SeriesForecaster, TrendSeasonalForecaster};
pub use model::ModelChoice;
pub use pipeline::{forecast_table, Pipeline, PipelineOutput};
pub use request::{validate_horizon, ForecastRequest, DEFAULT_HORIZON, MAX_HORIZON, MIN_HORIZON};
pub use result::{FittedParameters, ForecastPoint, ForecastResult, PointKind};
