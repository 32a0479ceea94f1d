use serde::{Deserialize, Serialize};
use std::fmt;

/// A single typed value from the input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Empty => Ok(()),
        }
    }
}

/// Inferred type of a whole column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Number,
    Text,
}

/// Parsed input: normalized header names, per-column kind, and typed rows.
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub kinds: Vec<ColumnKind>,
    pub rows: Vec<Vec<Cell>>,
    /// Raw text of every cell, kept so coercion errors can quote the input.
    pub raw: Vec<Vec<String>>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_serialize_untagged() {
        let cells = vec![
            Cell::Number(1.5),
            Cell::Text("AAPL".to_string()),
            Cell::Empty,
        ];
        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(json, r#"[1.5,"AAPL",null]"#);
    }

    #[test]
    fn column_lookup_is_case_sensitive() {
        let table = Table {
            columns: vec!["Date".to_string(), "Proceeds".to_string()],
            ..Default::default()
        };
        assert_eq!(table.column_index("Date"), Some(0));
        assert_eq!(table.column_index("date"), None);
    }
}
