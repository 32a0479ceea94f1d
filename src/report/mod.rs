pub mod dashboard;
pub mod export;
pub mod format;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::MetricsSummary;
use crate::models::{RowIssue, TradeRow};

pub use dashboard::Dashboard;
pub use format::{fmt_money, fmt_percent, NOT_APPLICABLE};

/// Everything one run of the pipeline produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeReport {
    /// Input column names after header normalization, in file order.
    pub columns: Vec<String>,
    /// Enriched rows, ascending by date (ties keep file order).
    pub rows: Vec<TradeRow>,
    pub summary: MetricsSummary,
    /// Rows left out under the skip policy. Always empty when aborting.
    #[serde(default)]
    pub skipped: Vec<RowIssue>,
}

impl TradeReport {
    /// `(Date, CumulativePNL)` pairs in report order, one per row.
    pub fn equity_curve(&self) -> Vec<(DateTime<Utc>, f64)> {
        self.rows.iter().map(|r| (r.date, r.cumulative_pnl)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
