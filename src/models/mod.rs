pub mod policy;
pub mod table;
pub mod trade;

pub use policy::RowPolicy;
pub use table::{Cell, ColumnKind, Table};
pub use trade::{RowIssue, TradeRow};
