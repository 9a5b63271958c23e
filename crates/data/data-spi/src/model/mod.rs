//! Data models for uploaded tables and time series.

mod interval;
mod series;
mod table;

pub use interval::Interval;
pub use series::{Observation, TimeSeries};
pub use table::{CellType, Column, ColumnRole, Preview, Table};
