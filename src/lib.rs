//! Sheetbind - binds SQL query results to spreadsheet templates
//!
//! This library moves tabular data in two directions:
//!
//! - **Forward**: populate a spreadsheet template with query results.
//!   Template cells hold placeholders like `?summary[0].total_value`
//!   (direct, one value) or `?products.name` (iterative, one generated
//!   row per result record, with row splicing, formula row-offset
//!   rewriting and style propagation).
//! - **Reverse**: extract values from a populated workbook into
//!   parameterized text templates, typically SQL statements. Templates
//!   hold references like `<Sheet1>!A1`, `<Sheet1>!A1:A10` or the open
//!   range `<Sheet1>!A1:`, which expands to one generated statement per
//!   populated row.
//!
//! # Example
//!
//! ```
//! use sheetbind::types::{Scalar, Sheet, Workbook};
//! use sheetbind::bind::workbook_to_sql;
//!
//! let mut sheet = Sheet::new();
//! sheet.set_value(0, 0, Scalar::Text("One".to_string()));
//! sheet.set_value(0, 1, Scalar::Number(1.0));
//!
//! let mut workbook = Workbook::new();
//! workbook.add_sheet("Sheet1", sheet);
//!
//! let templates = vec!["INSERT INTO t (s, n) VALUES ('<Sheet1>!A1', <Sheet1>!B1);".to_string()];
//! let statements = workbook_to_sql(&workbook, &templates)?;
//! assert_eq!(statements, vec!["INSERT INTO t (s, n) VALUES ('One', 1);"]);
//! # Ok::<(), sheetbind::error::BindError>(())
//! ```

pub mod address;
pub mod bind;
pub mod cli;
pub mod error;
pub mod excel;
pub mod reference;
pub mod types;

// Re-export commonly used types
pub use bind::{sql_to_workbook, workbook_to_sql};
pub use error::{BindError, BindResult};
pub use types::{Cell, QueryResultSet, Record, Scalar, Sheet, Workbook};
