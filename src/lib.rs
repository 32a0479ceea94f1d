pub mod analysis;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod report;
#[cfg(test)]
pub mod test_helpers;

pub use error::{JournalError, Result};
pub use pipeline::{run, run_file, PipelineOptions};
pub use report::TradeReport;
