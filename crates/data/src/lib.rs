//! Uploaded table handling
//!
//! Reads CSV uploads into typed tables, classifies their columns, and builds
//! time series from a chosen (date, value) column pair.
//!
//! # Example
//!
//! ```rust
//! use data::{build_series, classify, read_csv};
//!
//! let csv = "Month,Sales\n2024-01,10\n2024-02,12\n2024-03,11\n";
//! let table = read_csv(csv.as_bytes()).unwrap();
//!
//! let columns = classify(&table).unwrap();
//! assert_eq!(columns.date_columns, vec!["Month"]);
//!
//! let series = build_series(&table, "Month", "Sales").unwrap();
//! assert_eq!(series.len(), 3);
//! ```

pub mod classifier;
pub mod csv_reader;
pub mod dates;
pub mod series_builder;

pub use classifier::{classify, describe_columns, Classification, ColumnSummary};
pub use csv_reader::{read_csv, CsvSource, NA_MARKERS};
pub use dates::parse_timestamp;
pub use series_builder::{
    build_series, BuildOptions, DuplicatePolicy, SeriesBuilder, SpacingPolicy,
};

// Re-export the models so callers need a single dependency
pub use data_spi::{
    CellType, Column, ColumnRole, DataError, Interval, Observation, Preview, Result, Table,
    TableSource, TimeSeries,
};
