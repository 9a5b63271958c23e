//! Multipart upload form

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use data::{Classification, CsvSource, Table, TableSource};
use forecast::{ForecastError, ForecastRequest, ModelChoice};

use crate::error::ApiError;

/// Fields of the upload form. Empty text fields count as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadForm {
    pub file_name: Option<String>,
    pub file: Option<Vec<u8>>,
    pub date_column: Option<String>,
    pub value_column: Option<String>,
    pub model: Option<String>,
    pub horizon: Option<String>,
}

impl UploadForm {
    /// Drain `multipart`, rejecting files larger than `max_bytes`.
    pub async fn from_multipart(
        mut multipart: Multipart,
        max_bytes: usize,
    ) -> Result<Self, ApiError> {
        let to_api_error = |e: MultipartError| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge { limit: max_bytes }
            } else {
                ApiError::Upload(e.body_text())
            }
        };

        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(to_api_error)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "file" => {
                    let file_name = field.file_name().map(str::to_string);
                    let bytes = field.bytes().await.map_err(to_api_error)?;
                    if bytes.len() > max_bytes {
                        return Err(ApiError::PayloadTooLarge { limit: max_bytes });
                    }
                    // Browsers send an empty, nameless part when no file was chosen
                    if !bytes.is_empty() || file_name.as_deref().is_some_and(|n| !n.is_empty()) {
                        form.file_name = file_name;
                        form.file = Some(bytes.to_vec());
                    }
                }
                "date_column" | "value_column" | "model" | "horizon" => {
                    let text = field.text().await.map_err(to_api_error)?;
                    let text = text.trim();
                    if text.is_empty() {
                        continue;
                    }
                    let slot = match name.as_str() {
                        "date_column" => &mut form.date_column,
                        "value_column" => &mut form.value_column,
                        "model" => &mut form.model,
                        _ => &mut form.horizon,
                    };
                    *slot = Some(text.to_string());
                }
                other => tracing::debug!(field = other, "ignoring unknown form field"),
            }
        }
        Ok(form)
    }

    /// Parse the uploaded file.
    pub fn table(&self) -> Result<Table, ApiError> {
        let bytes = self
            .file
            .as_ref()
            .ok_or_else(|| ApiError::Upload("no file uploaded".to_string()))?;
        let name = self.file_name.clone().unwrap_or_else(|| "upload.csv".to_string());
        Ok(CsvSource::from_bytes(name, bytes.as_slice()).read_table()?)
    }

    /// Drop column selections that are not candidates of this file, the way
    /// a select box falls back to its first option when the options change.
    pub fn reset_stale_selections(&mut self, classification: &Classification) {
        if let Some(name) = &self.date_column {
            if !classification.date_columns.contains(name) {
                tracing::debug!(column = %name, "date column not in upload, using default");
                self.date_column = None;
            }
        }
        if let Some(name) = &self.value_column {
            if !classification.numeric_columns.contains(name) {
                tracing::debug!(column = %name, "value column not in upload, using default");
                self.value_column = None;
            }
        }
    }

    /// Build the request, filling unset fields the way the page's selectors
    /// default: first date candidate, first numeric candidate, first model,
    /// configured horizon.
    pub fn resolve_request(
        &self,
        classification: &Classification,
        default_horizon: usize,
    ) -> Result<ForecastRequest, ApiError> {
        let date_column = self
            .date_column
            .as_deref()
            .or(classification.default_date_column())
            .unwrap_or_default();
        let value_column = self
            .value_column
            .as_deref()
            .or(classification.default_value_column())
            .unwrap_or_default();

        let model = match &self.model {
            Some(token) => token.parse::<ModelChoice>()?,
            None => ModelChoice::default(),
        };
        let horizon = match &self.horizon {
            Some(raw) => raw.parse::<usize>().map_err(|_| {
                let reason = format!("'{}' is not a whole number", raw);
                ForecastError::invalid_request("horizon", reason)
            })?,
            None => default_horizon,
        };

        Ok(ForecastRequest::new(date_column, value_column, model, horizon)?)
    }
}
