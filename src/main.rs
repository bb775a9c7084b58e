//! CLI entry point for gtfs_od.
//!
//! Derives the dominant origin and destination stops of every route and
//! direction in a GTFS feed, and classifies lines by service type.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gtfs_od::classify::{Classifier, LineRecord, load_lines_from};
use gtfs_od::feed::FeedPaths;
use gtfs_od::od::{self, OriginDestinationRow};
use gtfs_od::output::{save_classified_csv, save_report_json, save_rows_csv, save_rows_tsv};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const OD_TSV: &str = "linhas_origem_destino.txt";
const OD_CSV: &str = "linhas_origem_destino.csv";
const CLASSIFIED_JSON: &str = "linhas_classificadas.json";
const CLASSIFIED_CSV: &str = "linhas_classificadas.csv";

#[derive(Parser)]
#[command(name = "gtfs_od")]
#[command(about = "Origin/destination stops and service types for GTFS bus lines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the most common origin and destination stop per route and direction
    #[command(visible_alias = "od")]
    OriginDestination {
        /// Directory holding routes.txt, trips.txt, stop_times.txt and stops.txt
        #[arg(short, long, default_value = "GTFS/GTFSBHTRANS")]
        gtfs_dir: PathBuf,

        /// Where to write the TSV and CSV tables (defaults to the GTFS directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Classify lines by service type from their code and name
    Classify {
        /// CSV with linha, nome_linha, route_id and optionally direction_id
        #[arg(short, long, default_value = "GTFS/GTFSBHTRANS/linhas_origem_destino.csv")]
        input: PathBuf,

        /// JSON document with totals, per-type counts and every line
        #[arg(long, default_value = "GTFS/GTFSBHTRANS/linhas_classificadas.json")]
        json_output: PathBuf,

        /// Flat CSV with one classified line per row
        #[arg(long, default_value = "GTFS/GTFSBHTRANS/linhas_classificadas.csv")]
        csv_output: PathBuf,
    },
    /// Run origin-destination, then classify its rows
    Pipeline {
        /// Directory holding routes.txt, trips.txt, stop_times.txt and stops.txt
        #[arg(short, long, default_value = "GTFS/GTFSBHTRANS")]
        gtfs_dir: PathBuf,

        /// Where to write all four output files (defaults to the GTFS directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/gtfs_od.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gtfs_od.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::OriginDestination {
            gtfs_dir,
            output_dir,
        } => {
            let output_dir = output_dir.unwrap_or_else(|| gtfs_dir.clone());
            origin_destination(&gtfs_dir, &output_dir)?;
        }
        Commands::Classify {
            input,
            json_output,
            csv_output,
        } => {
            let lines = load_lines_from(&input)
                .with_context(|| format!("Failed to read lines from {}", input.display()))?;
            classify(lines, &json_output, &csv_output)?;
        }
        Commands::Pipeline {
            gtfs_dir,
            output_dir,
        } => {
            let output_dir = output_dir.unwrap_or_else(|| gtfs_dir.clone());
            let rows = origin_destination(&gtfs_dir, &output_dir)?;
            classify(
                rows.iter().map(LineRecord::from),
                &output_dir.join(CLASSIFIED_JSON),
                &output_dir.join(CLASSIFIED_CSV),
            )?;
        }
    }

    Ok(())
}

/// Builds the origin/destination table and writes both serializations.
#[tracing::instrument(fields(gtfs_dir = %gtfs_dir.display(), output_dir = %output_dir.display()), skip_all)]
fn origin_destination(gtfs_dir: &Path, output_dir: &Path) -> Result<Vec<OriginDestinationRow>> {
    let paths = FeedPaths::in_dir(gtfs_dir);
    let rows = od::run(&paths)?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    save_rows_tsv(&output_dir.join(OD_TSV), &rows)?;
    save_rows_csv(&output_dir.join(OD_CSV), &rows)?;

    info!(rows = rows.len(), "Total lines (route + direction)");
    Ok(rows)
}

/// Classifies `lines` and writes the JSON document and the flat CSV.
fn classify<I: IntoIterator<Item = LineRecord>>(
    lines: I,
    json_output: &Path,
    csv_output: &Path,
) -> Result<()> {
    let classifier = Classifier::new()?;
    let report = classifier.classify_all(lines);

    for path in [json_output, csv_output] {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    save_report_json(json_output, &report)?;
    save_classified_csv(csv_output, &report.linhas)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_every_argument_has_help() {
        let cli = Cli::command();
        for sub in cli.get_subcommands() {
            for arg in sub.get_arguments().filter(|a| !a.is_positional()) {
                if matches!(arg.get_id().as_str(), "help" | "version") {
                    continue;
                }
                assert!(
                    arg.get_help().is_some(),
                    "{} --{} has no help text",
                    sub.get_name(),
                    arg.get_id()
                );
            }
        }
    }

    #[test]
    fn test_pipeline_defaults_output_dir_to_none() {
        let cli = Cli::try_parse_from(["gtfs_od", "pipeline", "-g", "feed"]).unwrap();
        match cli.command {
            Commands::Pipeline {
                gtfs_dir,
                output_dir,
            } => {
                assert_eq!(gtfs_dir, PathBuf::from("feed"));
                assert_eq!(output_dir, None);
            }
            _ => panic!("expected the pipeline subcommand"),
        }
    }
}
