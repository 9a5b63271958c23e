//! Rendering of CLI results

use anyhow::Context;
use clap::ValueEnum;
use data::{Classification, Preview};
use forecast::{FittedParameters, ForecastResult, PointKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

pub fn render_forecast(result: &ForecastResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Table => Ok(forecast_table(result)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(result).context("Failed to serialize forecast")
        }
        OutputFormat::Csv => forecast_csv(result),
    }
}

fn kind_label(kind: PointKind) -> &'static str {
    match kind {
        PointKind::History => "history",
        PointKind::Forecast => "forecast",
    }
}

fn forecast_table(result: &ForecastResult) -> String {
    let mut out = format!(
        "Model: {}\nSeries: {} by {} ({} observations, {})\n",
        result.model,
        result.value_column,
        result.date_column,
        result.history_len,
        result.interval
    );
    match &result.parameters {
        FittedParameters::HoltWinters {
            alpha,
            beta,
            gamma,
            period,
        } => out.push_str(&format!(
            "Parameters: alpha={:.3} beta={:.3} gamma={:.3} period={}\n",
            alpha, beta, gamma, period
        )),
        FittedParameters::TrendSeasonal {
            changepoints,
            yearly_seasonality,
        } => out.push_str(&format!(
            "Parameters: {} changepoints, yearly seasonality {}\n",
            changepoints.len(),
            if *yearly_seasonality { "on" } else { "off" }
        )),
    }
    out.push_str(&format!(
        "In-sample MAE: {:.4}  RMSE: {:.4}\n",
        result.metrics.mae, result.metrics.rmse
    ));
    if !result.spacing_consistent {
        out.push_str("Warning: dates are not evenly spaced\n");
    }

    out.push_str(&format!("\n{:<20} {:>14}  {}\n", "timestamp", "value", "kind"));
    for point in &result.points {
        out.push_str(&format!(
            "{:<20} {:>14.4}  {}\n",
            point.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            point.value,
            kind_label(point.kind)
        ));
    }
    out
}

fn forecast_csv(result: &ForecastResult) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([result.date_column.as_str(), result.value_column.as_str(), "kind"])?;
    for point in &result.points {
        writer.write_record([
            point.timestamp.format("%Y-%m-%d %H:%M:%S%.f").to_string(),
            point.value.to_string(),
            kind_label(point.kind).to_string(),
        ])?;
    }
    let bytes = writer.into_inner().context("Failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

pub fn render_columns(classification: &Classification, preview: &Preview) -> String {
    let mut out = String::from("Columns:\n");
    for column in &classification.columns {
        out.push_str(&format!(
            "  {:<24} {:<10} {}\n",
            column.name,
            format!("{:?}", column.cell_type).to_lowercase(),
            column.role
        ));
    }
    out.push_str(&format!("Date candidates: {}\n", classification.date_columns.join(", ")));
    out.push_str(&format!(
        "Numeric candidates: {}\n",
        classification.numeric_columns.join(", ")
    ));

    out.push_str(&format!(
        "\nPreview ({} of {} rows):\n{}\n",
        preview.rows.len(),
        preview.total_rows,
        preview.headers.join("\t")
    ));
    for row in &preview.rows {
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out
}
