//! API error type and HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use forecast::{ErrorCategory, ForecastError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Anything raised between the uploaded table and the forecast
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    /// The multipart body is malformed or lacks a required field
    #[error("Invalid upload: {0}")]
    Upload(String),

    /// The upload exceeds the configured size cap
    #[error("Upload exceeds the limit of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// A blocking worker panicked or was cancelled
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Forecast(e) => match e.category() {
                ErrorCategory::Structural | ErrorCategory::Parse | ErrorCategory::Request => {
                    StatusCode::BAD_REQUEST
                }
                ErrorCategory::Fitting => StatusCode::UNPROCESSABLE_ENTITY,
            },
            ApiError::Upload(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short machine-readable error class
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Forecast(e) => match e.category() {
                ErrorCategory::Structural => "structural",
                ErrorCategory::Parse => "parse",
                ErrorCategory::Request => "request",
                ErrorCategory::Fitting => "fitting",
            },
            ApiError::Upload(_) => "upload",
            ApiError::PayloadTooLarge { .. } => "payload_too_large",
            ApiError::Internal(_) => "internal",
        }
    }
}

impl From<data::DataError> for ApiError {
    fn from(e: data::DataError) -> Self {
        ApiError::Forecast(e.into())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() || status == StatusCode::UNPROCESSABLE_ENTITY {
            tracing::warn!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            kind: self.kind(),
        };
        (status, Json(body)).into_response()
    }
}
