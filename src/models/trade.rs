use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Cell;

/// One input row after coercion, enriched with the derived P&L columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRow {
    /// Zero-based position among the data rows of the input file.
    pub index: usize,
    pub date: DateTime<Utc>,
    pub proceeds: f64,
    pub cost_basis: f64,
    pub realized_pnl: f64,
    pub cumulative_pnl: f64,
    /// All original cells, aligned with the report's column list.
    pub fields: Vec<Cell>,
}

impl TradeRow {
    pub fn new(
        index: usize,
        date: DateTime<Utc>,
        proceeds: f64,
        cost_basis: f64,
        fields: Vec<Cell>,
    ) -> Self {
        Self {
            index,
            date,
            proceeds,
            cost_basis,
            realized_pnl: proceeds - cost_basis,
            cumulative_pnl: 0.0,
            fields,
        }
    }

    pub fn is_win(&self) -> bool {
        self.realized_pnl > 0.0
    }

    pub fn is_loss(&self) -> bool {
        self.realized_pnl < 0.0
    }
}

/// A data row left out of the report under the skip policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIssue {
    pub row: usize,
    pub column: String,
    pub message: String,
}
