use serde::{Deserialize, Serialize};

use crate::models::TradeRow;

/// Headline statistics for one report. `None` means the value is undefined
/// for this row set (no trades, no winners, no losers) and must not be
/// shown as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    /// Trades with a realized P&L of exactly zero.
    pub flat: usize,
    pub total_pnl: Option<f64>,
    pub win_rate: Option<f64>,
    pub avg_win: Option<f64>,
    pub avg_loss: Option<f64>,
}

impl MetricsSummary {
    /// Rows are expected in report (date) order so that `total_pnl` is summed
    /// in the same order as the cumulative column.
    pub fn from_rows(rows: &[TradeRow]) -> Self {
        let trades = rows.len();
        if trades == 0 {
            return Self::default();
        }

        let total_pnl = rows.iter().fold(0.0, |acc, r| acc + r.realized_pnl);

        let wins: Vec<f64> = rows
            .iter()
            .filter(|r| r.is_win())
            .map(|r| r.realized_pnl)
            .collect();
        let losses: Vec<f64> = rows
            .iter()
            .filter(|r| r.is_loss())
            .map(|r| r.realized_pnl)
            .collect();

        Self {
            trades,
            wins: wins.len(),
            losses: losses.len(),
            flat: trades - wins.len() - losses.len(),
            total_pnl: Some(total_pnl),
            win_rate: Some(wins.len() as f64 / trades as f64),
            avg_win: mean(&wins),
            avg_loss: mean(&losses),
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
