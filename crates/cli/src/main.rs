//! # rustful-cli
//!
//! Command-line interface for CSV time series forecasting.

mod output;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use data::{classify, BuildOptions, CsvSource, DuplicatePolicy, SpacingPolicy, TableSource};
use forecast::{ForecastRequest, ModelChoice, Pipeline, DEFAULT_HORIZON};
use output::OutputFormat;
use rustful_server::ServerConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "rustful")]
#[command(about = "Time series forecasting from CSV files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast a column of a CSV file
    Forecast {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Date column (default: first date-like column)
        #[arg(short, long)]
        date_column: Option<String>,

        /// Value column (default: first numeric column)
        #[arg(short, long)]
        value_column: Option<String>,

        /// Model (Holt-Winters, Prophet)
        #[arg(short, long, default_value = "Holt-Winters")]
        model: ModelChoice,

        /// Number of future periods (1-24)
        #[arg(long, default_value_t = DEFAULT_HORIZON)]
        horizon: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Average values that share a timestamp instead of failing
        #[arg(long)]
        average_duplicates: bool,

        /// Fail on irregular date spacing instead of warning
        #[arg(long)]
        strict_spacing: bool,
    },

    /// Show column roles and a preview of a CSV file
    Columns {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Number of preview rows
        #[arg(long, default_value = "5")]
        rows: usize,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
    },
}

/// Settings of the `forecast` subcommand
struct ForecastArgs {
    input: PathBuf,
    date_column: Option<String>,
    value_column: Option<String>,
    model: ModelChoice,
    horizon: usize,
    options: BuildOptions,
}

/// Run the pipeline on a file and render the result.
fn run_forecast(args: &ForecastArgs, format: OutputFormat) -> CliResult<String> {
    let table = CsvSource::from_path(&args.input)
        .read_table()
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    let classification = classify(&table)?;

    let date_column = args
        .date_column
        .as_deref()
        .or(classification.default_date_column())
        .unwrap_or_default();
    let value_column = args
        .value_column
        .as_deref()
        .or(classification.default_value_column())
        .unwrap_or_default();
    let request = ForecastRequest::new(date_column, value_column, args.model, args.horizon)?;

    let output = Pipeline::new(args.options).run(&table, &request)?;
    tracing::info!(
        model = %request.model(),
        points = output.result.len(),
        "forecast computed"
    );
    output::render_forecast(&output.result, format)
}

fn run_columns(input: &Path, rows: usize) -> CliResult<String> {
    let table = CsvSource::from_path(input)
        .read_table()
        .with_context(|| format!("Failed to load {}", input.display()))?;
    let classification = classify(&table)?;
    Ok(output::render_columns(&classification, &table.preview(rows)))
}

fn emit(text: &str, output: Option<&Path>) -> CliResult<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Forecast written to {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn run_serve(host: String, port: u16) -> CliResult<()> {
    let config = ServerConfig {
        host,
        port,
        ..ServerConfig::from_env()?
    };
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(rustful_server::serve(config))
}

fn run(cli: Cli) -> CliResult<()> {
    match cli.command {
        Commands::Forecast {
            input,
            date_column,
            value_column,
            model,
            horizon,
            format,
            output,
            average_duplicates,
            strict_spacing,
        } => {
            let options = BuildOptions {
                duplicates: if average_duplicates {
                    DuplicatePolicy::Mean
                } else {
                    DuplicatePolicy::Reject
                },
                spacing: if strict_spacing {
                    SpacingPolicy::Strict
                } else {
                    SpacingPolicy::Warn
                },
                ..BuildOptions::default()
            };
            let args = ForecastArgs {
                input,
                date_column,
                value_column,
                model,
                horizon,
                options,
            };
            let text = run_forecast(&args, format)?;
            emit(&text, output.as_deref())
        }
        Commands::Columns { input, rows } => emit(&run_columns(&input, rows)?, None),
        Commands::Serve { port, host } => run_serve(host, port),
    }
}

fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so piped output stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,rustful_server=info,tower_http=info".into()),
        )
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_csv(name: &str, contents: &str) -> PathBuf {
        let file_name = format!("rustful-cli-{}-{}.csv", name, std::process::id());
        let path = std::env::temp_dir().join(file_name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn monthly_csv(rows: usize) -> String {
        let mut csv = String::from("Month,Store,Sales\n");
        for i in 0..rows {
            csv.push_str(&format!(
                "{}-{:02},a,{}\n",
                2021 + i / 12,
                i % 12 + 1,
                100 + i + (i % 12) * 3
            ));
        }
        csv
    }

    fn args(input: PathBuf, model: ModelChoice, horizon: usize) -> ForecastArgs {
        ForecastArgs {
            input,
            date_column: None,
            value_column: None,
            model,
            horizon,
            options: BuildOptions::default(),
        }
    }

    #[test]
    fn test_cli_parses_forecast_arguments() {
        let cli = Cli::try_parse_from([
            "rustful", "forecast", "--input", "sales.csv", "--model", "prophet", "--horizon", "6",
            "--format", "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Forecast {
                model,
                horizon,
                format,
                date_column,
                ..
            } => {
                assert_eq!(model, ModelChoice::Prophet);
                assert_eq!(horizon, 6);
                assert_eq!(format, OutputFormat::Json);
                assert!(date_column.is_none());
            }
            _ => panic!("Expected the forecast subcommand"),
        }

        let unknown_model =
            Cli::try_parse_from(["rustful", "forecast", "--input", "x.csv", "--model", "arima"]);
        assert!(unknown_model.is_err());
    }

    #[test]
    fn test_forecast_csv_output() {
        let path = write_csv("forecast", &monthly_csv(24));
        let forecast_args = args(path.clone(), ModelChoice::HoltWinters, 12);
        let text = run_forecast(&forecast_args, OutputFormat::Csv).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Month,Sales,kind");
        assert_eq!(lines.len(), 1 + 36);
        assert!(lines[1].starts_with("2021-01-01 00:00:00,100,history"));
        assert!(lines[36].ends_with(",forecast"));
    }

    #[test]
    fn test_forecast_json_and_table_output() {
        let path = write_csv("json", &monthly_csv(24));
        let prophet = args(path.clone(), ModelChoice::Prophet, 3);
        let json = run_forecast(&prophet, OutputFormat::Json).unwrap();
        let holt_winters = args(path.clone(), ModelChoice::HoltWinters, 3);
        let table = run_forecast(&holt_winters, OutputFormat::Table).unwrap();
        std::fs::remove_file(&path).ok();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["model"], "Prophet");
        assert_eq!(value["points"].as_array().unwrap().len(), 27);

        assert!(table.starts_with("Model: Holt-Winters\n"));
        assert!(table.contains("Parameters: alpha="));
        assert_eq!(table.lines().filter(|l| l.ends_with("forecast")).count(), 3);
    }

    #[test]
    fn test_forecast_errors_propagate() {
        let path = write_csv("short", &monthly_csv(6));
        let short = args(path.clone(), ModelChoice::HoltWinters, 3);
        let err = run_forecast(&short, OutputFormat::Table).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(err.to_string().starts_with("Model fitting failed"));

        let missing = std::env::temp_dir().join("rustful-cli-does-not-exist.csv");
        let missing = args(missing, ModelChoice::HoltWinters, 3);
        let err = run_forecast(&missing, OutputFormat::Table).unwrap_err();
        assert!(err.to_string().starts_with("Failed to load"));
    }

    #[test]
    fn test_columns_report() {
        let path = write_csv("columns", &monthly_csv(8));
        let text = run_columns(&path, 3).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(text.contains("Date candidates: Month, Store"));
        assert!(text.contains("Numeric candidates: Sales"));
        assert!(text.contains("Preview (3 of 8 rows):"));
        assert!(text.contains("Month\tStore\tSales"));
    }
}
