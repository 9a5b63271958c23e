//! Data error types.

use thiserror::Error;

use crate::model::{ColumnRole, Interval};

/// Errors raised while reading a table or building a series from it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// Input could not be read
    #[error("Failed to read {source_name}: {reason}")]
    Io { source_name: String, reason: String },

    /// Malformed CSV (ragged rows, invalid UTF-8, ...)
    #[error("Failed to parse CSV: {0}")]
    Csv(String),

    /// The input has no header row
    #[error("No columns to parse from file")]
    NoColumns,

    /// A header cell is blank
    #[error("Column {index} has an empty header")]
    EmptyHeader { index: usize },

    /// Two columns share a name
    #[error("Duplicate column name '{0}'")]
    DuplicateHeader(String),

    /// The table lacks a date-like or a numeric column
    #[error("The CSV must contain at least one date and one numeric column.")]
    MissingColumnKinds { date_like: usize, numeric: usize },

    /// A requested column does not exist
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// A requested column exists but cannot play the requested role
    #[error("Column '{column}' is not a {expected} column")]
    WrongColumnRole { column: String, expected: ColumnRole },

    /// A date cell is not a timestamp
    #[error("Date parsing error: column '{column}', row {row}: cannot parse '{value}' as a date ({reason})")]
    DateParse {
        column: String,
        row: usize,
        value: String,
        reason: String,
    },

    /// Two rows share a timestamp
    #[error("Duplicate timestamp {timestamp} in column '{column}'")]
    DuplicateTimestamp { column: String, timestamp: String },

    /// Observed spacing does not match the declared interval
    #[error("Irregular spacing for {interval} data: {days} days between {from} and {to}")]
    IrregularSpacing {
        interval: Interval,
        from: String,
        to: String,
        days: i64,
    },

    /// Table construction with inconsistent columns
    #[error("Invalid table: {0}")]
    InvalidTable(String),
}

impl DataError {
    /// Whether this is a structural input error (the table itself cannot
    /// yield a time series) as opposed to a problem with a single value.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            DataError::NoColumns
                | DataError::EmptyHeader { .. }
                | DataError::DuplicateHeader(_)
                | DataError::MissingColumnKinds { .. }
        )
    }
}

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_kinds_message() {
        let error = DataError::MissingColumnKinds {
            date_like: 0,
            numeric: 2,
        };
        assert_eq!(
            error.to_string(),
            "The CSV must contain at least one date and one numeric column."
        );
        assert!(error.is_structural());
    }

    #[test]
    fn test_date_parse_message_names_column_and_value() {
        let error = DataError::DateParse {
            column: "Month".to_string(),
            row: 3,
            value: "not-a-date".to_string(),
            reason: "no supported date format matched".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.starts_with("Date parsing error"));
        assert!(msg.contains("'Month'"));
        assert!(msg.contains("not-a-date"));
        assert!(!error.is_structural());
    }

    #[test]
    fn test_wrong_role_message() {
        let error = DataError::WrongColumnRole {
            column: "Region".to_string(),
            expected: ColumnRole::Numeric,
        };
        assert_eq!(error.to_string(), "Column 'Region' is not a numeric column");
    }

    #[test]
    fn test_irregular_spacing_message() {
        let error = DataError::IrregularSpacing {
            interval: Interval::Monthly,
            from: "2024-01-01".to_string(),
            to: "2024-01-08".to_string(),
            days: 7,
        };
        assert_eq!(
            error.to_string(),
            "Irregular spacing for Monthly data: 7 days between 2024-01-01 and 2024-01-08"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(DataError::NoColumns);
        assert_eq!(error.to_string(), "No columns to parse from file");
    }
}
