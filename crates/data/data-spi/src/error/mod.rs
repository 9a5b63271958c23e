//! Error types for table and series operations.

mod data_error;

pub use data_error::{DataError, Result};
