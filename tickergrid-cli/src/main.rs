//! TickerGrid CLI — align and summary commands over local JSON snapshots.
//!
//! Commands:
//! - `align` — print the aligned multi-dataset payload for a ticker/range
//! - `summary` — print the latest non-null value per column

mod snapshot;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tickergrid_core::{
    align, gather_series, latest_values, AlignmentRequest, DatasetAdapter, DatasetTag, IndexMode,
};

use snapshot::SnapshotAdapter;

#[derive(Parser)]
#[command(
    name = "tickergrid",
    about = "TickerGrid CLI — gap-honest alignment of heterogeneous financial time series"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Align all datasets for a ticker onto a unified timeline.
    Align {
        /// Ticker identifier (e.g. AAPL).
        ticker: String,

        /// Start date (YYYY-MM-DD). Defaults to 1 year before end.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Alignment mode: daily (calendar index, forward-filled) or sparse
        /// (one row per reference point of the sparsest dataset).
        #[arg(long, default_value = "daily")]
        mode: String,

        /// Comma-separated datasets to include. Defaults to all five.
        #[arg(long)]
        include: Option<String>,

        /// Directory holding {TICKER}_{dataset}.json snapshots.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
    /// Latest non-null value per column over the default one-year range.
    Summary {
        /// Ticker identifier (e.g. AAPL).
        ticker: String,

        /// Directory holding {TICKER}_{dataset}.json snapshots.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Align {
            ticker,
            start,
            end,
            mode,
            include,
            data_dir,
        } => run_align(&ticker, start, end, &mode, include, &data_dir),
        Commands::Summary { ticker, data_dir } => run_summary(&ticker, &data_dir),
    }
}

fn run_align(
    ticker: &str,
    start: Option<String>,
    end: Option<String>,
    mode: &str,
    include: Option<String>,
    data_dir: &std::path::Path,
) -> Result<()> {
    let request = AlignmentRequest {
        ticker: ticker.to_string(),
        start: parse_date(start.as_deref())?,
        end: parse_date(end.as_deref())?,
        mode: parse_mode(mode)?,
        include: parse_include(include.as_deref())?,
    };

    let response = run_request(&request, data_dir)?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn run_summary(ticker: &str, data_dir: &std::path::Path) -> Result<()> {
    let request = AlignmentRequest::new(ticker);
    let response = run_request(&request, data_dir)?;
    let entries = latest_values(&response.columns, &response.rows);

    let payload = serde_json::json!({
        "ticker": response.ticker,
        "as_of_range": { "start": response.start, "end": response.end },
        "data": entries,
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

/// Gather snapshots for every included dataset and run the engine.
fn run_request(
    request: &AlignmentRequest,
    data_dir: &std::path::Path,
) -> Result<tickergrid_core::AlignedResponse> {
    let today = chrono::Local::now().date_naive();
    let (start, end) = request.resolve_range(today)?;

    let adapters: Vec<SnapshotAdapter> = request
        .included_tags()
        .into_iter()
        .map(|tag| SnapshotAdapter::new(data_dir, tag))
        .collect();
    let adapter_refs: Vec<&dyn DatasetAdapter> =
        adapters.iter().map(|a| a as &dyn DatasetAdapter).collect();

    let outcome = gather_series(&adapter_refs, &request.ticker, start, end);
    for err in &outcome.degraded {
        eprintln!("note: {err} — dataset degraded to empty");
    }

    align(request, &outcome.series, today).context("alignment failed")
}

fn parse_date(s: Option<&str>) -> Result<Option<NaiveDate>> {
    s.map(|s| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{s}' (expected YYYY-MM-DD)"))
    })
    .transpose()
}

fn parse_mode(s: &str) -> Result<IndexMode> {
    match s.trim().to_ascii_lowercase().as_str() {
        "daily" => Ok(IndexMode::Daily),
        "sparse" => Ok(IndexMode::Sparse),
        other => bail!("unknown mode '{other}' (expected daily or sparse)"),
    }
}

fn parse_include(s: Option<&str>) -> Result<Option<Vec<DatasetTag>>> {
    match s {
        None => Ok(None),
        Some(list) => {
            let mut tags = Vec::new();
            for part in list.split(',') {
                let part = part.trim();
                if part.is_empty() {
                    continue;
                }
                tags.push(part.parse::<DatasetTag>()?);
            }
            if tags.is_empty() {
                bail!("--include given but no datasets listed");
            }
            Ok(Some(tags))
        }
    }
}
