//! Bytes in, `TradeReport` out.
//!
//! parse → normalize headers → check required columns → coerce → derive
//! RealizedPNL → stable sort by Date → running CumulativePNL → summary.
//! Nothing here touches global state; the same input and options always
//! give the same report.

use chrono_tz::Tz;
use std::path::Path;
use tracing::debug;

use crate::analysis::MetricsSummary;
use crate::config::Config;
use crate::error::{JournalError, Result};
use crate::ingest::{coerce, parse_table};
use crate::models::{RowPolicy, TradeRow};
use crate::report::TradeReport;

/// Read-only settings for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Zone used for timestamps that carry no offset.
    pub timezone: Tz,
    pub on_bad_row: RowPolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            timezone: Tz::UTC,
            on_bad_row: RowPolicy::Abort,
        }
    }
}

impl From<&Config> for PipelineOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            timezone: cfg.timezone,
            on_bad_row: cfg.on_bad_row,
        }
    }
}

pub fn run(bytes: &[u8], opts: &PipelineOptions) -> Result<TradeReport> {
    let table = parse_table(bytes)?;
    let (mut rows, skipped) = coerce(&table, opts.timezone, opts.on_bad_row)?;

    if rows.is_empty() && !skipped.is_empty() {
        return Err(JournalError::EmptyResult {
            rejected: skipped.len(),
        });
    }

    // sort_by_key is stable: equal dates keep file order.
    rows.sort_by_key(|r| r.date);
    accumulate(&mut rows);

    let summary = MetricsSummary::from_rows(&rows);
    debug!(
        "Built report: {} trades, {} skipped, total {:?}",
        summary.trades,
        skipped.len(),
        summary.total_pnl
    );

    Ok(TradeReport {
        columns: table.columns,
        rows,
        summary,
        skipped,
    })
}

/// Load a whole file into memory and run the pipeline on it.
pub fn run_file(path: impl AsRef<Path>, opts: &PipelineOptions) -> Result<TradeReport> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| JournalError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    run(&bytes, opts)
}

/// Fill `cumulative_pnl` with the running sum of `realized_pnl`.
pub fn accumulate(rows: &mut [TradeRow]) {
    let mut running = 0.0;
    for row in rows.iter_mut() {
        running += row.realized_pnl;
        row.cumulative_pnl = running;
    }
}
