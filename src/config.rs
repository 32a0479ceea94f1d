use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::RowPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Ingest
    pub timezone: Tz,
    pub on_bad_row: RowPolicy,

    // Dashboard
    pub max_rows: usize,
    pub chart_height: usize,

    // Logging
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timezone: Tz::UTC,
            on_bad_row: RowPolicy::Abort,
            max_rows: 50,
            chart_height: 12,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Read settings from the environment (and `.env` if present). Unset or
    /// unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Config::default();
        let env = |key: &str, default: &str| -> String {
            lookup(key).unwrap_or_else(|| default.to_string())
        };

        Config {
            timezone: env("TRADE_JOURNAL_TZ", "UTC")
                .parse()
                .unwrap_or(defaults.timezone),
            on_bad_row: env("TRADE_JOURNAL_ON_BAD_ROW", "abort")
                .parse()
                .unwrap_or(defaults.on_bad_row),
            max_rows: env("TRADE_JOURNAL_MAX_ROWS", "50")
                .parse()
                .unwrap_or(defaults.max_rows),
            chart_height: env("TRADE_JOURNAL_CHART_HEIGHT", "12")
                .parse()
                .unwrap_or(defaults.chart_height),
            log_level: env("LOG_LEVEL", &defaults.log_level),
        }
    }
}
