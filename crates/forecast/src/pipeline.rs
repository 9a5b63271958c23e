//! End-to-end forecasting flow
//!
//! `table → classify → build series → dispatch`, stopping at the first
//! failure. Column classification runs first so that a table without a
//! date-like or numeric column never reaches the series builder.

use data::{classify, BuildOptions, Classification, SeriesBuilder, Table, TimeSeries};

use crate::dispatcher::dispatch;
use crate::error::Result;
use crate::request::ForecastRequest;
use crate::result::ForecastResult;

/// Intermediate products of a pipeline run, kept for display.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub classification: Classification,
    pub series: TimeSeries,
    pub result: ForecastResult,
}

/// Forecasting flow over one uploaded table.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    builder: SeriesBuilder,
}

impl Pipeline {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            builder: SeriesBuilder::new(options),
        }
    }

    /// Run the whole flow for `request`.
    pub fn run(&self, table: &Table, request: &ForecastRequest) -> Result<PipelineOutput> {
        let classification = classify(table)?;
        let series = self
            .builder
            .build(table, request.date_column(), request.value_column())?;
        let result = dispatch(&series, request.model(), request.horizon())?;

        Ok(PipelineOutput {
            classification,
            series,
            result,
        })
    }
}

/// Run the default pipeline and keep only the forecast.
pub fn forecast_table(table: &Table, request: &ForecastRequest) -> Result<ForecastResult> {
    Pipeline::default().run(table, request).map(|out| out.result)
}
