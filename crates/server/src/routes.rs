//! Page and API route handlers
//!
//! Multipart bodies are drained on the async runtime; CSV parsing, model
//! fitting and page rendering run on the blocking pool.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::Json;
use data::{classify, describe_columns, Classification, ColumnSummary, Preview};
use forecast::{ForecastResult, Pipeline};
use serde::Serialize;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::page::{self, PageView};
use crate::upload::UploadForm;
use crate::AppState;

/// Columns endpoint payload
#[derive(Debug, Serialize)]
pub struct ColumnsResponse {
    pub file_name: Option<String>,
    pub columns: Vec<ColumnSummary>,
    pub date_columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub preview: Preview,
}

/// Run CPU-bound work off the async workers.
async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work).await?
}

/// `GET /`: empty upload form.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(page::render(&PageView::new(state.config.default_horizon)))
}

/// `POST /`: the form round trip. Failures are shown on the page with the
/// status the JSON API would return.
pub async fn submit(
    State(state): State<AppState>,
    multipart: Multipart,
) -> (StatusCode, Html<String>) {
    let config = Arc::clone(&state.config);
    let rendered = match UploadForm::from_multipart(multipart, config.max_upload_bytes).await {
        Ok(form) => run_blocking(move || Ok(build_page(&config, form))).await,
        Err(e) => Err(e),
    };

    let (status, html) = rendered.unwrap_or_else(|e| {
        let mut view = PageView::new(state.config.default_horizon);
        error_page(&mut view, e)
    });
    (status, Html(html))
}

fn build_page(config: &ServerConfig, form: UploadForm) -> (StatusCode, String) {
    let mut view = PageView::new(config.default_horizon);
    match fill_page(config, form, &mut view) {
        Ok(()) => (StatusCode::OK, page::render(&view)),
        Err(e) => error_page(&mut view, e),
    }
}

fn error_page(view: &mut PageView, error: ApiError) -> (StatusCode, String) {
    tracing::debug!(error = %error, "forecast page request failed");
    let status = error.status();
    view.error = Some(error.to_string());
    (status, page::render(view))
}

fn fill_page(
    config: &ServerConfig,
    mut form: UploadForm,
    view: &mut PageView,
) -> Result<(), ApiError> {
    let table = form.table()?;
    view.file_name = form.file_name.clone();
    view.preview = Some(table.preview(config.preview_rows));

    let classification = classify(&table)?;
    // The form keeps the previous file's selections
    form.reset_stale_selections(&classification);
    let request = form.resolve_request(&classification, config.default_horizon)?;
    view.classification = Some(classification);
    view.request = Some(request.clone());

    let output = Pipeline::default().run(&table, &request)?;
    tracing::info!(
        model = %request.model(),
        horizon = request.horizon(),
        points = output.result.len(),
        "forecast rendered"
    );
    view.result = Some(output.result);
    Ok(())
}

/// `POST /api/v1/columns`: classify an uploaded file without forecasting.
pub async fn columns(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ColumnsResponse>, ApiError> {
    let form = UploadForm::from_multipart(multipart, state.config.max_upload_bytes).await?;
    let preview_rows = state.config.preview_rows;

    let response = run_blocking(move || {
        let table = form.table()?;
        let Classification {
            date_columns,
            numeric_columns,
            ..
        } = classify(&table)?;

        Ok(ColumnsResponse {
            file_name: form.file_name,
            columns: describe_columns(&table),
            date_columns,
            numeric_columns,
            preview: table.preview(preview_rows),
        })
    })
    .await?;
    Ok(Json(response))
}

/// `POST /api/v1/forecast`: the full pipeline as JSON.
pub async fn forecast(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ForecastResult>, ApiError> {
    let form = UploadForm::from_multipart(multipart, state.config.max_upload_bytes).await?;
    let default_horizon = state.config.default_horizon;

    let result = run_blocking(move || {
        let table = form.table()?;
        let classification = classify(&table)?;
        let request = form.resolve_request(&classification, default_horizon)?;

        let output = Pipeline::default().run(&table, &request)?;
        tracing::info!(
            model = %request.model(),
            horizon = request.horizon(),
            points = output.result.len(),
            "forecast computed"
        );
        Ok(output.result)
    })
    .await?;
    Ok(Json(result))
}
