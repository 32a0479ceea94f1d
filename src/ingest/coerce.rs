use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::debug;

use crate::error::{JournalError, Result};
use crate::ingest::table::{
    require_columns, RequiredColumns, COST_BASIS_COLUMN, DATE_COLUMN, PROCEEDS_COLUMN,
};
use crate::models::{Cell, RowIssue, RowPolicy, Table, TradeRow};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    // IBKR flex / activity statements
    "%Y-%m-%d, %H:%M:%S",
    "%Y%m%d;%H%M%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y"];

const REALIZED_PNL_COLUMN: &str = "RealizedPNL";

/// Parse a plain decimal number. Surrounding whitespace is ignored; NaN and
/// infinities are not accepted.
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// Parse a date-like string. Values without an offset are read as local time
/// in `tz`.
pub fn parse_timestamp(value: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Turn every data row into a `TradeRow`. Under `RowPolicy::Abort` the first
/// bad value fails the whole call; under `RowPolicy::Skip` the row is dropped
/// and reported instead.
pub fn coerce(table: &Table, tz: Tz, policy: RowPolicy) -> Result<(Vec<TradeRow>, Vec<RowIssue>)> {
    let cols = require_columns(table)?;

    let mut rows = Vec::with_capacity(table.len());
    let mut issues = Vec::new();

    for (index, (cells, raw)) in table.rows.iter().zip(&table.raw).enumerate() {
        match coerce_row(index, cells, raw, cols, tz) {
            Ok(row) => rows.push(row),
            Err(e) => match policy {
                RowPolicy::Abort => return Err(e),
                RowPolicy::Skip => {
                    debug!("Skipping row {}: {}", index, e);
                    issues.push(to_issue(e, index));
                }
            },
        }
    }

    Ok((rows, issues))
}

fn coerce_row(
    index: usize,
    cells: &[Cell],
    raw: &[String],
    cols: RequiredColumns,
    tz: Tz,
) -> Result<TradeRow> {
    let date = parse_timestamp(&raw[cols.date], tz)
        .ok_or_else(|| JournalError::type_coercion(DATE_COLUMN, index, &raw[cols.date]))?;
    let proceeds = parse_number(&raw[cols.proceeds]).ok_or_else(|| {
        JournalError::type_coercion(PROCEEDS_COLUMN, index, &raw[cols.proceeds])
    })?;
    let cost_basis = parse_number(&raw[cols.cost_basis]).ok_or_else(|| {
        JournalError::type_coercion(COST_BASIS_COLUMN, index, &raw[cols.cost_basis])
    })?;

    // Required columns carry their coerced values; everything else passes through.
    let mut fields = cells.to_vec();
    fields[cols.date] = Cell::Text(date.to_rfc3339_opts(SecondsFormat::Secs, true));
    fields[cols.proceeds] = Cell::Number(proceeds);
    fields[cols.cost_basis] = Cell::Number(cost_basis);

    let row = TradeRow::new(index, date, proceeds, cost_basis, fields);
    // Finite inputs can still overflow, e.g. 1e308 - -1e308.
    if !row.realized_pnl.is_finite() {
        return Err(JournalError::type_coercion(
            REALIZED_PNL_COLUMN,
            index,
            format!("{} - {}", raw[cols.proceeds], raw[cols.cost_basis]),
        ));
    }

    Ok(row)
}

fn to_issue(err: JournalError, row: usize) -> RowIssue {
    let column = match &err {
        JournalError::TypeCoercion { column, .. } => column.clone(),
        _ => String::new(),
    };
    RowIssue {
        row,
        column,
        message: err.to_string(),
    }
}
