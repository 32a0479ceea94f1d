use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, JournalError>;

/// Everything that can stop a trade report from being built.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("parse error{}: {message}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Parse { line: Option<u64>, message: String },

    #[error("missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("cannot convert column '{column}' at row {row}: {value:?}")]
    TypeCoercion {
        column: String,
        row: usize,
        value: String,
    },

    #[error("no usable rows ({rejected} rejected)")]
    EmptyResult { rejected: usize },

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl JournalError {
    pub fn parse(line: Option<u64>, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    pub fn type_coercion(column: impl Into<String>, row: usize, value: impl Into<String>) -> Self {
        Self::TypeCoercion {
            column: column.into(),
            row,
            value: value.into(),
        }
    }

    /// Short name of the failure kind, used as a prefix in user-facing output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "ParseError",
            Self::MissingColumn { .. } => "MissingColumnError",
            Self::TypeCoercion { .. } => "TypeCoercionError",
            Self::EmptyResult { .. } => "EmptyResultError",
            Self::Io { .. } => "IoError",
        }
    }
}

impl From<csv::Error> for JournalError {
    fn from(e: csv::Error) -> Self {
        let line = e.position().map(|p| p.line());
        match e.kind() {
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => Self::parse(
                line,
                format!("expected {expected_len} fields, found {len}"),
            ),
            csv::ErrorKind::Utf8 { err, .. } => {
                Self::parse(line, format!("invalid UTF-8: {err}"))
            }
            _ => Self::parse(line, e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_message_includes_line_when_known() {
        let e = JournalError::parse(Some(4), "expected 3 fields, found 2");
        assert_eq!(e.to_string(), "parse error at line 4: expected 3 fields, found 2");

        let e = JournalError::parse(None, "empty input");
        assert_eq!(e.to_string(), "parse error: empty input");
    }

    #[test]
    fn coercion_message_names_column_and_row() {
        let e = JournalError::type_coercion("Proceeds", 3, "abc");
        assert_eq!(
            e.to_string(),
            "cannot convert column 'Proceeds' at row 3: \"abc\""
        );
        assert_eq!(e.kind(), "TypeCoercionError");
    }
}
