//! JSON and CSV artifacts for a `TradeReport`.
//!
//! - `report.json`: the whole bundle; undefined metrics are `null`
//! - `trades.csv`: the enriched trade table in report order
//! - `equity.csv`: the `(date, cumulative_pnl)` series

use std::path::Path;

use anyhow::{Context, Result};
use chrono::SecondsFormat;
use tracing::info;

use crate::report::TradeReport;

pub fn export_json(report: &TradeReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize TradeReport to JSON")
}

/// Original columns followed by `RealizedPNL` and `CumulativePNL`.
pub fn export_trades_csv(report: &TradeReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header: Vec<&str> = report.columns.iter().map(String::as_str).collect();
    header.push("RealizedPNL");
    header.push("CumulativePNL");
    wtr.write_record(&header)?;

    for row in &report.rows {
        let mut record: Vec<String> = row.fields.iter().map(|c| c.to_string()).collect();
        record.push(row.realized_pnl.to_string());
        record.push(row.cumulative_pnl.to_string());
        wtr.write_record(&record)?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

pub fn export_equity_csv(report: &TradeReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "cumulative_pnl"])?;
    for (date, value) in report.equity_curve() {
        wtr.write_record([
            date.to_rfc3339_opts(SecondsFormat::Secs, true),
            value.to_string(),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Write `report.json`, `trades.csv` and `equity.csv` into `dir`, creating it
/// if needed.
pub fn save_artifacts(report: &TradeReport, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export dir: {}", dir.display()))?;

    let files = [
        ("report.json", export_json(report)?),
        ("trades.csv", export_trades_csv(report)?),
        ("equity.csv", export_equity_csv(report)?),
    ];
    for (name, contents) in &files {
        let path = dir.join(name);
        std::fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    info!("Exported {} rows to {}", report.rows.len(), dir.display());
    Ok(())
}
