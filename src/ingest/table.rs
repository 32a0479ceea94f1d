use std::collections::HashSet;
use tracing::debug;

use crate::error::{JournalError, Result};
use crate::ingest::coerce::parse_number;
use crate::models::{Cell, ColumnKind, Table};

pub const DATE_COLUMN: &str = "Date";
pub const PROCEEDS_COLUMN: &str = "Proceeds";
pub const COST_BASIS_COLUMN: &str = "CostBasis";

const REQUIRED_COLUMNS: [&str; 3] = [DATE_COLUMN, PROCEEDS_COLUMN, COST_BASIS_COLUMN];

/// Positions of the required columns inside a `Table`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredColumns {
    pub date: usize,
    pub proceeds: usize,
    pub cost_basis: usize,
}

/// Strip surrounding whitespace (and a UTF-8 BOM some spreadsheet tools emit).
/// Case is preserved.
pub fn normalize_header(name: &str) -> String {
    name.trim_start_matches('\u{feff}').trim().to_string()
}

/// Decode comma-separated bytes into a typed table. The first record is the
/// header. A column is numeric when every non-empty value in it parses as a
/// number; otherwise it is text.
pub fn parse_table(bytes: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(JournalError::parse(None, "empty input"));
    }

    let columns = dedupe_columns(headers.iter().map(normalize_header).collect())?;

    let mut raw: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        raw.push(record.iter().map(|s| s.to_string()).collect());
    }

    let kinds: Vec<ColumnKind> = (0..columns.len())
        .map(|col| infer_kind(raw.iter().map(|r| r[col].as_str())))
        .collect();

    let rows: Vec<Vec<Cell>> = raw
        .iter()
        .map(|values| {
            values
                .iter()
                .zip(&kinds)
                .map(|(v, kind)| to_cell(v, *kind))
                .collect()
        })
        .collect();

    debug!("Parsed {} rows x {} columns", raw.len(), columns.len());

    Ok(Table {
        columns,
        kinds,
        rows,
        raw,
    })
}

/// Locate `Date`, `Proceeds` and `CostBasis` by exact (post-trim) name.
/// Checked in that order; the first absent one is reported.
pub fn require_columns(table: &Table) -> Result<RequiredColumns> {
    let find = |name: &str| {
        table
            .column_index(name)
            .ok_or_else(|| JournalError::missing_column(name))
    };

    Ok(RequiredColumns {
        date: find(DATE_COLUMN)?,
        proceeds: find(PROCEEDS_COLUMN)?,
        cost_basis: find(COST_BASIS_COLUMN)?,
    })
}

/// Give blank headers an `Unnamed: <position>` name and suffix repeated ones
/// (`Note`, `Note.1`, ...). A repeated required column is ambiguous and fails.
fn dedupe_columns(names: Vec<String>) -> Result<Vec<String>> {
    let mut seen: HashSet<String> = HashSet::with_capacity(names.len());
    let mut columns = Vec::with_capacity(names.len());

    for (i, name) in names.into_iter().enumerate() {
        let base = if name.is_empty() {
            format!("Unnamed: {}", i)
        } else {
            name
        };

        let mut unique = base.clone();
        if seen.contains(&unique) {
            if REQUIRED_COLUMNS.contains(&base.as_str()) {
                return Err(JournalError::parse(
                    Some(1),
                    format!("duplicate column '{}'", base),
                ));
            }
            let mut n = 1;
            while seen.contains(&unique) {
                unique = format!("{}.{}", base, n);
                n += 1;
            }
        }

        seen.insert(unique.clone());
        columns.push(unique);
    }

    Ok(columns)
}

fn infer_kind<'a>(mut values: impl Iterator<Item = &'a str>) -> ColumnKind {
    let all_numeric = values.all(|v| v.trim().is_empty() || parse_number(v).is_some());
    if all_numeric {
        ColumnKind::Number
    } else {
        ColumnKind::Text
    }
}

/// Text cells keep their value verbatim; only a truly empty field is `Empty`.
fn to_cell(value: &str, kind: ColumnKind) -> Cell {
    match kind {
        ColumnKind::Number if value.trim().is_empty() => Cell::Empty,
        ColumnKind::Number => parse_number(value)
            .map(Cell::Number)
            .unwrap_or_else(|| Cell::Text(value.to_string())),
        ColumnKind::Text if value.is_empty() => Cell::Empty,
        ColumnKind::Text => Cell::Text(value.to_string()),
    }
}
