use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What to do with a data row whose Date, Proceeds or CostBasis cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// Fail the whole run on the first bad value.
    #[default]
    Abort,
    /// Leave the row out and report it alongside the results.
    Skip,
}

impl fmt::Display for RowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowPolicy::Abort => write!(f, "abort"),
            RowPolicy::Skip => write!(f, "skip"),
        }
    }
}

impl FromStr for RowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "abort" => Ok(RowPolicy::Abort),
            "skip" => Ok(RowPolicy::Skip),
            other => Err(format!("unknown row policy '{}' (expected abort or skip)", other)),
        }
    }
}
