use chrono::{Duration, NaiveDate};

/// Build a trade report CSV from (day offset, proceeds, cost basis) tuples.
/// Day 0 is 2024-01-01. A `Symbol` column rides along untouched.
pub fn make_csv(trades: &[(i64, f64, f64)]) -> String {
    let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut csv = String::from("Date,Symbol,Proceeds,CostBasis\n");
    for (i, &(day, proceeds, cost_basis)) in trades.iter().enumerate() {
        let date = base + Duration::days(day);
        csv.push_str(&format!(
            "{},SYM{},{},{}\n",
            date.format("%Y-%m-%d"),
            i,
            proceeds,
            cost_basis
        ));
    }
    csv
}
