//! Forecast error types

use algorithm::TsError;
use data::DataError;
use thiserror::Error;

/// Result type alias for forecast operations
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur between an uploaded table and a forecast
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Reading, classifying or preparing the table failed
    #[error(transparent)]
    Data(#[from] DataError),

    /// The forecasting model could not be fitted or evaluated
    #[error("Model fitting failed: {0}")]
    Model(#[from] TsError),

    /// A request parameter is out of range
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidRequest { name: String, reason: String },

    /// Unrecognised model token
    #[error("Unknown model '{0}': expected 'Holt-Winters' or 'Prophet'")]
    UnknownModel(String),

    /// Future timestamps could not be generated
    #[error("Cannot extend timeline: {0}")]
    Timeline(String),
}

/// Coarse error taxonomy used by front ends to pick a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The table cannot yield a time series at all
    Structural,
    /// A value in the table is malformed
    Parse,
    /// The caller asked for something invalid
    Request,
    /// The model could not be fitted
    Fitting,
}

impl ForecastError {
    pub fn invalid_request(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ForecastError::InvalidRequest {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ForecastError::Data(e) if e.is_structural() => ErrorCategory::Structural,
            ForecastError::Data(DataError::ColumnNotFound(_))
            | ForecastError::Data(DataError::WrongColumnRole { .. }) => ErrorCategory::Request,
            ForecastError::Data(_) => ErrorCategory::Parse,
            ForecastError::Model(_) | ForecastError::Timeline(_) => ErrorCategory::Fitting,
            ForecastError::InvalidRequest { .. } | ForecastError::UnknownModel(_) => {
                ErrorCategory::Request
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_errors_pass_through() {
        let error: ForecastError = DataError::MissingColumnKinds {
            date_like: 0,
            numeric: 1,
        }
        .into();
        assert_eq!(
            error.to_string(),
            "The CSV must contain at least one date and one numeric column."
        );
        assert_eq!(error.category(), ErrorCategory::Structural);
    }

    #[test]
    fn test_model_error_message() {
        let error: ForecastError = TsError::InsufficientData {
            required: 24,
            actual: 10,
        }
        .into();
        assert_eq!(
            error.to_string(),
            "Model fitting failed: Insufficient data: need at least 24 points, got 10"
        );
        assert_eq!(error.category(), ErrorCategory::Fitting);
    }

    #[test]
    fn test_categories() {
        let parse: ForecastError = DataError::DateParse {
            column: "Month".to_string(),
            row: 1,
            value: "x".to_string(),
            reason: "no supported date format matched".to_string(),
        }
        .into();
        assert_eq!(parse.category(), ErrorCategory::Parse);

        let missing: ForecastError = DataError::ColumnNotFound("Date".to_string()).into();
        assert_eq!(missing.category(), ErrorCategory::Request);

        assert_eq!(
            ForecastError::invalid_request("horizon", "must be between 1 and 24").category(),
            ErrorCategory::Request
        );
        assert_eq!(
            ForecastError::UnknownModel("ARIMA".to_string()).category(),
            ErrorCategory::Request
        );
    }
}
