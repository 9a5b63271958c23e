//! Server-rendered forecasting page

use std::fmt::Write;

use data::{Classification, Preview};
use forecast::{
    FittedParameters, ForecastRequest, ForecastResult, ModelChoice, MAX_HORIZON, MIN_HORIZON,
};

use crate::chart;

/// Everything the page can show. Sections render only when filled.
#[derive(Debug, Clone, Default)]
pub struct PageView {
    pub file_name: Option<String>,
    pub preview: Option<Preview>,
    pub classification: Option<Classification>,
    pub request: Option<ForecastRequest>,
    pub default_horizon: usize,
    pub result: Option<ForecastResult>,
    pub error: Option<String>,
}

impl PageView {
    pub fn new(default_horizon: usize) -> Self {
        Self {
            default_horizon,
            ..Self::default()
        }
    }
}

/// Minimal HTML escaping for text and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(view: &PageView) -> String {
    let mut body = String::new();

    if let Some(error) = &view.error {
        let _ = write!(body, r#"<div class="error" role="alert">{}</div>"#, escape(error));
    }

    body.push_str(&render_form(view));

    if let Some(preview) = &view.preview {
        body.push_str(&render_preview(preview, view.file_name.as_deref()));
    }
    if let Some(result) = &view.result {
        body.push_str(&render_result(result));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Time Series Forecasting</title>
<style>
body {{ font-family: sans-serif; max-width: 900px; margin: 2em auto; color: #222; }}
form {{ display: grid; grid-template-columns: 12em 1fr; gap: 0.5em 1em; align-items: center; }}
table {{ border-collapse: collapse; margin: 1em 0; }}
th, td {{ border: 1px solid #ccc; padding: 0.25em 0.6em; text-align: right; }}
.error {{ background: #fde2e1; border: 1px solid #e0a0a0; padding: 0.75em; margin-bottom: 1em; }}
.metrics {{ color: #555; }}
</style>
</head>
<body>
<h1>Time Series Forecasting</h1>
<p>Upload a CSV with at least one date column and one numeric column, pick the columns and a model, and get a forecast chart.</p>
{body}
</body>
</html>"#
    )
}

fn render_form(view: &PageView) -> String {
    let selected_date = view.request.as_ref().map(|r| r.date_column());
    let selected_value = view.request.as_ref().map(|r| r.value_column());
    let selected_model = view.request.as_ref().map(|r| r.model()).unwrap_or_default();
    let horizon = view
        .request
        .as_ref()
        .map(|r| r.horizon())
        .unwrap_or(view.default_horizon);

    let (date_candidates, numeric_candidates) = match &view.classification {
        Some(c) => (c.date_columns.as_slice(), c.numeric_columns.as_slice()),
        None => (&[][..], &[][..]),
    };

    let mut form = String::from(
        r#"<form method="post" action="/" enctype="multipart/form-data">
<label for="file">CSV file</label><input type="file" id="file" name="file" accept=".csv,text/csv" required>
"#,
    );
    let _ = writeln!(
        form,
        r#"<label for="date_column">Date column</label>{}"#,
        select("date_column", date_candidates.iter().map(String::as_str), selected_date)
    );
    let _ = writeln!(
        form,
        r#"<label for="value_column">Value column</label>{}"#,
        select("value_column", numeric_candidates.iter().map(String::as_str), selected_value)
    );
    let _ = writeln!(
        form,
        r#"<label for="model">Model</label>{}"#,
        select(
            "model",
            ModelChoice::ALL.iter().map(|m| m.label()),
            Some(selected_model.label())
        )
    );
    let _ = writeln!(
        form,
        r#"<label for="horizon">Forecast horizon</label><input type="number" id="horizon" name="horizon" min="{MIN_HORIZON}" max="{MAX_HORIZON}" value="{horizon}">"#
    );
    form.push_str("<span></span><button type=\"submit\">Forecast</button>\n</form>\n");
    form
}

/// A `<select>`; with no options it is rendered empty and the server
/// falls back to the first candidate of the uploaded file.
fn select<'a>(
    name: &str,
    options: impl Iterator<Item = &'a str>,
    selected: Option<&str>,
) -> String {
    let mut html = format!(r#"<select id="{name}" name="{name}">"#);
    for option in options {
        let marker = if Some(option) == selected { " selected" } else { "" };
        let option = escape(option);
        let _ = write!(html, r#"<option value="{option}"{marker}>{option}</option>"#);
    }
    html.push_str("</select>");
    html
}

fn render_preview(preview: &Preview, file_name: Option<&str>) -> String {
    let mut html = String::from("<h2>Uploaded Data Preview</h2>\n");
    if let Some(name) = file_name {
        let _ = write!(html, "<p>{} ({} rows)</p>", escape(name), preview.total_rows);
    }
    html.push_str("<table><thead><tr>");
    for header in &preview.headers {
        let _ = write!(html, "<th>{}</th>", escape(header));
    }
    html.push_str("</tr></thead><tbody>");
    for row in &preview.rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape(cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</tbody></table>\n");
    html
}

fn render_result(result: &ForecastResult) -> String {
    let mut html = String::from("<h2>Forecast Results</h2>\n");
    html.push_str(&chart::render_svg(result));

    let parameters = match &result.parameters {
        FittedParameters::HoltWinters {
            alpha,
            beta,
            gamma,
            period,
        } => format!("alpha={alpha:.2}, beta={beta:.2}, gamma={gamma:.2}, period={period}"),
        FittedParameters::TrendSeasonal {
            changepoints,
            yearly_seasonality,
        } => format!(
            "{} changepoints, yearly seasonality {}",
            changepoints.len(),
            if *yearly_seasonality { "on" } else { "off" }
        ),
    };
    let _ = write!(
        html,
        r#"<p class="metrics">{model}: {history} observations, {horizon} {interval} periods ahead; {parameters}; in-sample MAE {mae:.3}, RMSE {rmse:.3}</p>"#,
        model = result.model,
        history = result.history_len,
        horizon = result.horizon,
        interval = result.interval.to_string().to_lowercase(),
        mae = result.metrics.mae,
        rmse = result.metrics.rmse,
    );
    if !result.spacing_consistent {
        html.push_str(r#"<p class="metrics">The dates are not evenly spaced; the forecast assumes a regular interval.</p>"#);
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_empty_page_has_form() {
        let html = render(&PageView::new(12));
        assert!(html.contains(r#"enctype="multipart/form-data""#));
        assert!(html.contains(r#"value="12""#));
        assert!(html.contains(r#"<option value="Holt-Winters" selected>"#));
        assert!(html.contains(r#"<option value="Prophet">"#));
        assert!(!html.contains("Forecast Results"));
        assert!(!html.contains(r#"class="error""#));
    }

    #[test]
    fn test_preview_and_error() {
        let view = PageView {
            file_name: Some("sales.csv".to_string()),
            preview: Some(Preview {
                headers: vec!["Month".to_string(), "Sales".to_string()],
                rows: vec![vec!["2024-01".to_string(), "NaN".to_string()]],
                total_rows: 1,
            }),
            error: Some("Column '<x>' not found".to_string()),
            ..PageView::new(12)
        };
        let html = render(&view);
        assert!(html.contains("Uploaded Data Preview"));
        assert!(html.contains("<td>NaN</td>"));
        assert!(html.contains("sales.csv (1 rows)"));
        assert!(html.contains("Column &#39;&lt;x&gt;&#39; not found"));
    }
}
