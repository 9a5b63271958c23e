//! SVG line chart for forecast results.

use std::fmt::Write;

use forecast::{ForecastPoint, ForecastResult};

use crate::page::escape;

pub const WIDTH: f64 = 800.0;
pub const HEIGHT: f64 = 400.0;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 30.0;
const MARGIN_BOTTOM: f64 = 50.0;

pub const HISTORY_COLOR: &str = "#1f77b4";
pub const FORECAST_COLOR: &str = "#ff7f0e";

/// Plot area mapping from (point index, value) to pixels.
struct Frame {
    n: usize,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn new(points: &[ForecastPoint]) -> Self {
        let finite = points.iter().map(|p| p.value).filter(|v| v.is_finite());
        let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        let (min, max) = if min.is_finite() { (min, max) } else { (0.0, 1.0) };

        // 5% padding; flat series get a unit band
        let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
        Self {
            n: points.len(),
            y_min: min - pad,
            y_max: max + pad,
        }
    }

    fn x(&self, index: usize) -> f64 {
        let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        if self.n <= 1 {
            return MARGIN_LEFT + plot_width / 2.0;
        }
        MARGIN_LEFT + plot_width * index as f64 / (self.n - 1) as f64
    }

    fn y(&self, value: f64) -> f64 {
        let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        MARGIN_TOP + plot_height * (self.y_max - value) / (self.y_max - self.y_min)
    }

    fn polyline(&self, points: impl Iterator<Item = (usize, f64)>) -> String {
        points
            .filter(|(_, v)| v.is_finite())
            .map(|(i, v)| format!("{:.1},{:.1}", self.x(i), self.y(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Render history and forecast as two polylines.
///
/// The forecast line starts at the last history point so the two segments
/// join. Non-finite values are left out of the lines.
pub fn render_svg(result: &ForecastResult) -> String {
    let frame = Frame::new(&result.points);
    let history_len = result.history().len();

    let history = frame.polyline(result.history().iter().enumerate().map(|(i, p)| (i, p.value)));
    let forecast_start = history_len.saturating_sub(1);
    let forecast = frame.polyline(
        result.points[forecast_start..]
            .iter()
            .enumerate()
            .map(|(i, p)| (forecast_start + i, p.value)),
    );

    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img">"#,
        w = WIDTH,
        h = HEIGHT
    );
    let _ = write!(
        svg,
        r#"<text x="{x}" y="18" text-anchor="middle" font-size="14">{title}</text>"#,
        x = WIDTH / 2.0,
        title = escape(&format!("{} forecast ({})", result.value_column, result.model)),
    );

    // Axes
    let bottom = HEIGHT - MARGIN_BOTTOM;
    let _ = write!(
        svg,
        r##"<line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="#888"/><line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="#888"/>"##,
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = bottom,
        r = WIDTH - MARGIN_RIGHT
    );

    for value in [frame.y_min, (frame.y_min + frame.y_max) / 2.0, frame.y_max] {
        let _ = write!(
            svg,
            r#"<text class="y-label" x="{x}" y="{y:.1}" text-anchor="end" font-size="11">{value:.1}</text>"#,
            x = MARGIN_LEFT - 6.0,
            y = frame.y(value) + 4.0,
        );
    }

    for index in x_label_indices(result.len()) {
        let label = result.points[index].timestamp.format("%Y-%m-%d");
        let _ = write!(
            svg,
            r#"<text class="x-label" x="{x:.1}" y="{y}" text-anchor="middle" font-size="11">{label}</text>"#,
            x = frame.x(index),
            y = bottom + 18.0,
        );
    }
    let _ = write!(
        svg,
        r#"<text x="{x}" y="{y}" text-anchor="middle" font-size="12">{label}</text>"#,
        x = WIDTH / 2.0,
        y = HEIGHT - 8.0,
        label = escape(&result.date_column),
    );

    if !history.is_empty() {
        let _ = write!(
            svg,
            r#"<polyline class="history" fill="none" stroke="{HISTORY_COLOR}" stroke-width="2" points="{history}"/>"#
        );
    }
    if result.horizon > 0 && !forecast.is_empty() {
        let _ = write!(
            svg,
            r#"<polyline class="forecast" fill="none" stroke="{FORECAST_COLOR}" stroke-width="2" stroke-dasharray="6 4" points="{forecast}"/>"#
        );
    }

    // Legend
    let legend_x = WIDTH - MARGIN_RIGHT - 150.0;
    for (row, (label, color)) in [("History", HISTORY_COLOR), ("Forecast", FORECAST_COLOR)]
        .into_iter()
        .enumerate()
    {
        let y = MARGIN_TOP + 10.0 + row as f64 * 16.0;
        let _ = write!(
            svg,
            r#"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="{color}" stroke-width="2"/><text x="{tx}" y="{ty}" font-size="11">{label}</text>"#,
            x1 = legend_x,
            x2 = legend_x + 20.0,
            tx = legend_x + 26.0,
            ty = y + 4.0,
        );
    }

    svg.push_str("</svg>");
    svg
}

/// First, middle and last point; fewer when the timeline is short.
fn x_label_indices(n: usize) -> Vec<usize> {
    let mut indices = vec![0, n / 2, n.saturating_sub(1)];
    indices.dedup();
    indices.retain(|&i| i < n);
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use algorithm::utils::metrics::MetricsSummary;
    use chrono::{Months, NaiveDate};
    use data::Interval;
    use forecast::{FittedParameters, ModelChoice, PointKind};

    fn result(values: &[f64], history_len: usize) -> ForecastResult {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &value)| ForecastPoint {
                timestamp: start.checked_add_months(Months::new(i as u32)).unwrap(),
                value,
                kind: if i < history_len {
                    PointKind::History
                } else {
                    PointKind::Forecast
                },
            })
            .collect();
        ForecastResult {
            model: ModelChoice::HoltWinters,
            date_column: "Month".to_string(),
            value_column: "Sales <units>".to_string(),
            interval: Interval::Monthly,
            history_len,
            horizon: values.len() - history_len,
            spacing_consistent: true,
            parameters: FittedParameters::HoltWinters {
                alpha: 0.5,
                beta: 0.1,
                gamma: 0.1,
                period: 12,
            },
            metrics: MetricsSummary::compute(&[], &[]),
            points,
        }
    }

    #[test]
    fn test_two_lines_that_join() {
        let svg = render_svg(&result(&[1.0, 2.0, 3.0, 4.0, 5.0], 3));
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 2);

        // Last history vertex is the first forecast vertex
        let points_of = |class: &str| {
            let line = svg.split(&format!(r#"class="{}""#, class)).nth(1).unwrap();
            let points = line.split("points=\"").nth(1).unwrap();
            points.split('"').next().unwrap().to_string()
        };
        let history_points = points_of("history");
        let forecast_points = points_of("forecast");
        assert_eq!(
            history_points.split(' ').last(),
            forecast_points.split(' ').next()
        );
    }

    #[test]
    fn test_labels_and_escaping() {
        let svg = render_svg(&result(&[10.0, 20.0, 30.0, 40.0], 2));
        assert_eq!(svg.matches(r#"class="x-label""#).count(), 3);
        assert_eq!(svg.matches(r#"class="y-label""#).count(), 3);
        assert!(svg.contains("2024-01-01"));
        assert!(svg.contains("2024-04-01"));
        assert!(svg.contains("Sales &lt;units&gt;"));
    }

    #[test]
    fn test_non_finite_and_flat_values() {
        let svg = render_svg(&result(&[5.0, f64::NAN, 5.0, 5.0], 3));
        assert!(!svg.contains("NaN"));
        assert!(!svg.contains("inf"));
        assert!(svg.contains("4.0"));
        assert!(svg.contains("6.0"));
    }

    #[test]
    fn test_x_label_indices() {
        assert_eq!(x_label_indices(0), Vec::<usize>::new());
        assert_eq!(x_label_indices(1), vec![0]);
        assert_eq!(x_label_indices(2), vec![0, 1]);
        assert_eq!(x_label_indices(36), vec![0, 18, 35]);
    }
}
