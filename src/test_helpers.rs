use chrono::{DateTime, Duration, Utc};

use crate::models::{Cell, TradeRow};

/// Two trades listed out of date order: Jan 2 (+20) before Jan 1 (-10).
pub const SCENARIO_A: &str = "Date,Proceeds,CostBasis\n\
                              2024-01-02,100,80\n\
                              2024-01-01,50,60\n";

/// Create rows from (proceeds, cost_basis) tuples with one-day-apart dates.
/// `cumulative_pnl` is left at zero.
pub fn make_rows(data: &[(f64, f64)]) -> Vec<TradeRow> {
    let base = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc);

    data.iter()
        .enumerate()
        .map(|(i, &(proceeds, cost_basis))| {
            let date = base + Duration::days(i as i64);
            TradeRow::new(
                i,
                date,
                proceeds,
                cost_basis,
                vec![
                    Cell::Text(date.to_rfc3339()),
                    Cell::Number(proceeds),
                    Cell::Number(cost_basis),
                ],
            )
        })
        .collect()
}
