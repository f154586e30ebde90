//! The binding engine: forward (query results → workbook) and reverse
//! (workbook → generated SQL). The two directions use independent
//! template grammars and do not call each other.

mod forward;
mod reverse;

pub use forward::sql_to_workbook;
pub use reverse::workbook_to_sql;
