//! Reverse binding: generate text (typically SQL statements) from a
//! populated workbook.
//!
//! Each template is handled independently. Templates with only
//! single-cell references produce exactly one statement; templates with
//! at least one open or closed range produce one statement per row
//! position, up to the longest range's length. A missing sheet, address
//! or value substitutes the empty string rather than failing.

use crate::address;
use crate::error::BindResult;
use crate::reference::{scan_cell_refs, CellRef};
use crate::types::Workbook;
use tracing::debug;

/// A scanned reference with its addresses decoded and, for ranges, the
/// effective end row resolved against the workbook.
struct ResolvedRef {
    cell_ref: CellRef,
    start_row: usize,
    col: usize,
    /// For closed ranges, the explicit end row; for open ranges, the last
    /// populated row in the column (absent when the sheet is missing).
    end_row: Option<usize>,
}

impl ResolvedRef {
    /// Row count this range contributes to the statement count. Plain
    /// single-cell references do not participate.
    fn row_count(&self) -> Option<usize> {
        if !self.cell_ref.is_range() {
            return None;
        }
        self.end_row
            .map(|end| end.saturating_sub(self.start_row) + 1)
    }
}

/// Generate one or more statements per template. Range templates expand
/// to multiple outputs, so the result can be longer than `templates`.
pub fn workbook_to_sql(workbook: &Workbook, templates: &[String]) -> BindResult<Vec<String>> {
    let mut statements = Vec::with_capacity(templates.len());
    for template in templates {
        bind_template(workbook, template, &mut statements)?;
    }
    Ok(statements)
}

fn bind_template(
    workbook: &Workbook,
    template: &str,
    statements: &mut Vec<String>,
) -> BindResult<()> {
    let refs = scan_cell_refs(template);
    if refs.is_empty() {
        statements.push(template.to_string());
        return Ok(());
    }

    let mut resolved = Vec::with_capacity(refs.len());
    for cell_ref in refs {
        let (start_row, col) = address::decode(&cell_ref.start)?;
        let end_row = match &cell_ref.end {
            Some(end) => Some(address::decode(end)?.0),
            None if cell_ref.open => workbook
                .sheet(&cell_ref.sheet)
                .map(|sheet| sheet.last_populated_row(col, start_row)),
            None => None,
        };
        resolved.push(ResolvedRef {
            cell_ref,
            start_row,
            col,
            end_row,
        });
    }

    if !resolved.iter().any(|r| r.cell_ref.is_range()) {
        statements.push(render_row(workbook, template, &resolved, 0));
        return Ok(());
    }

    let max_rows = resolved
        .iter()
        .filter_map(ResolvedRef::row_count)
        .max()
        .unwrap_or(0);
    debug!(rows = max_rows, "expanding range template");

    for k in 0..max_rows {
        statements.push(render_row(workbook, template, &resolved, k));
    }
    Ok(())
}

/// Render the template for row position `k`, substituting each reference
/// in place. A reference past its closed range's explicit end is left
/// untouched.
fn render_row(workbook: &Workbook, template: &str, resolved: &[ResolvedRef], k: usize) -> String {
    let mut out = String::with_capacity(template.len());
    let mut pos = 0;
    for r in resolved {
        out.push_str(&template[pos..r.cell_ref.span.start]);
        match substitute(workbook, r, k) {
            Some(text) => out.push_str(&text),
            None => out.push_str(&template[r.cell_ref.span.clone()]),
        }
        pos = r.cell_ref.span.end;
    }
    out.push_str(&template[pos..]);
    out
}

/// The text a reference contributes at row position `k`: a range reads
/// `start_row + k` in its column, a single cell reads its fixed address.
/// `None` means the position is past a closed range's explicit end. An
/// open range keeps reading past its resolved extent and substitutes the
/// empty string there.
fn substitute(workbook: &Workbook, r: &ResolvedRef, k: usize) -> Option<String> {
    let row = if r.cell_ref.is_range() {
        let row = r.start_row + k;
        if let Some(end) = r.end_row {
            if r.cell_ref.end.is_some() && row > end {
                return None;
            }
        }
        row
    } else {
        r.start_row
    };

    let value = workbook
        .sheet(&r.cell_ref.sheet)
        .and_then(|sheet| sheet.cell(row, r.col))
        .map(|cell| cell.value.to_string())
        .unwrap_or_default();
    Some(value)
}
