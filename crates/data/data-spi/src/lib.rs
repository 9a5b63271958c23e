//! Tabular Data Service Provider Interface
//!
//! Defines the models and contracts shared by everything that turns an
//! uploaded table into a time series: the table itself with its declared
//! column types, the resulting [`TimeSeries`], the nominal sampling
//! [`Interval`], and [`DataError`].

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::TableSource;
pub use error::{DataError, Result};
pub use model::{
    CellType, Column, ColumnRole, Interval, Observation, Preview, Table, TimeSeries,
};
