//! Reference scanning for the two template grammars.
//!
//! Forward grammar, found inside template cell text:
//!
//! - `?queryName.columnName`: iterative, one generated row per record
//! - `?queryName[index].columnName`: direct, exactly one value
//!
//! Reverse grammar, found inside text templates:
//!
//! - `<SheetName>!A1`: single cell
//! - `<SheetName>!A1:A10`: closed range
//! - `<SheetName>!A1:`: open range, extent resolved against the sheet
//!
//! Both scans are stateless: each call returns the complete ordered match
//! list for its input, with no residual position carried between calls.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static QUERY_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\?(\w+)(?:\[(\d+)\])?\.(\w+)").unwrap());

static CELL_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([^>]+)>!([A-Z]+\d+)(?::([A-Z]+\d+)?)?").unwrap());

/// A classified forward-grammar reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryRef {
    /// `?query[index].column`, resolving to exactly one value.
    Direct {
        query: String,
        index: usize,
        column: String,
    },
    /// `?query.column`, resolving to one generated row per record.
    Iterative { query: String, column: String },
}

impl QueryRef {
    /// Scan cell text for the first forward-grammar match. Only the first
    /// match in a cell counts; the cell's surrounding text is discarded by
    /// the binder once a match is found.
    pub fn first_in(text: &str) -> Option<QueryRef> {
        let caps = QUERY_REF.captures(text)?;
        let query = caps[1].to_string();
        let column = caps[3].to_string();
        match caps.get(2).and_then(|m| m.as_str().parse::<usize>().ok()) {
            Some(index) => Some(QueryRef::Direct {
                query,
                index,
                column,
            }),
            None => Some(QueryRef::Iterative { query, column }),
        }
    }
}

/// One reverse-grammar match, with the byte span it occupies in the
/// template so the binder can substitute it in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRef {
    pub sheet: String,
    pub start: String,
    pub end: Option<String>,
    /// Trailing `:` with no end address.
    pub open: bool,
    pub span: Range<usize>,
}

impl CellRef {
    pub fn is_range(&self) -> bool {
        self.open || self.end.is_some()
    }
}

/// Collect every reverse-grammar match in the template, left to right,
/// non-overlapping.
pub fn scan_cell_refs(template: &str) -> Vec<CellRef> {
    CELL_REF
        .captures_iter(template)
        .map(|caps| {
            let whole = caps.get(0).expect("capture group 0 always present");
            CellRef {
                sheet: caps[1].to_string(),
                start: caps[2].to_string(),
                end: caps.get(3).map(|m| m.as_str().to_string()),
                open: whole.as_str().ends_with(':'),
                span: whole.range(),
            }
        })
        .collect()
}
