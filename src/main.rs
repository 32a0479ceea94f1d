use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use trade_journal::config::Config;
use trade_journal::models::RowPolicy;
use trade_journal::pipeline::{self, PipelineOptions};
use trade_journal::report::{export, Dashboard};

#[derive(Parser)]
#[command(
    name = "trade-journal",
    about = "Realized P&L dashboard for broker trade reports"
)]
struct Cli {
    /// Trade report CSV with Date, Proceeds and CostBasis columns.
    file: Option<PathBuf>,

    /// Print the report as JSON instead of the dashboard.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Also write report.json, trades.csv and equity.csv into this directory.
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Timezone for timestamps without an offset (e.g. America/New_York).
    #[arg(long)]
    tz: Option<String>,

    /// What to do with rows that cannot be read: abort or skip.
    #[arg(long)]
    on_bad_row: Option<RowPolicy>,

    /// Number of trades shown in the table.
    #[arg(long)]
    max_rows: Option<usize>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let cfg = Config::from_env();

    // Logs go to stderr so stdout only carries the dashboard or JSON.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    match run(&cli, cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error processing file: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, mut cfg: Config) -> Result<()> {
    if let Some(tz) = &cli.tz {
        cfg.timezone = tz
            .parse::<Tz>()
            .map_err(|_| anyhow!("unknown timezone '{}'", tz))?;
    }
    if let Some(policy) = cli.on_bad_row {
        cfg.on_bad_row = policy;
    }
    if let Some(max_rows) = cli.max_rows {
        cfg.max_rows = max_rows;
    }

    let Some(path) = &cli.file else {
        println!("Upload an IBKR CSV trade report to get started.");
        return Ok(());
    };

    info!(
        "Loading {} (tz {}, bad rows: {})",
        path.display(),
        cfg.timezone,
        cfg.on_bad_row
    );

    let opts = PipelineOptions::from(&cfg);
    let report = pipeline::run_file(path, &opts).map_err(|e| anyhow!("{}: {}", e.kind(), e))?;

    if !report.skipped.is_empty() {
        warn!("Skipped {} unreadable rows", report.skipped.len());
    }

    if let Some(dir) = &cli.export_dir {
        export::save_artifacts(&report, dir)?;
    }

    if cli.json {
        println!("{}", export::export_json(&report)?);
    } else {
        Dashboard::new(&report)
            .with_max_rows(cfg.max_rows)
            .with_chart_height(cfg.chart_height)
            .print();
    }

    Ok(())
}
