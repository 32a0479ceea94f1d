pub mod coerce;
pub mod table;

pub use coerce::{coerce, parse_number, parse_timestamp};
pub use table::{normalize_header, parse_table, require_columns, RequiredColumns};
