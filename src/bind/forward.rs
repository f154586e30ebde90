//! Forward binding: populate a workbook template with query results.
//!
//! Two passes per sheet. The scan pass classifies every placeholder cell
//! into a direct reference (explicit record index) or a contribution to a
//! per-row iterative group. The resolution pass overwrites direct cells,
//! then expands each iterative template row into one row per result
//! record, splicing blank rows below it, rewriting formula row offsets
//! and propagating styles.
//!
//! Resolution failures are not errors: a missing query, index or column
//! leaves the placeholder cell untouched, and an empty or absent result
//! sequence leaves the whole template row untouched.

use crate::error::BindResult;
use crate::reference::QueryRef;
use crate::types::{Cell, Extent, QueryResultSet, Record, Scalar, Sheet, Workbook};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use tracing::debug;

/// Column-letter + row-number tokens embedded in formula text.
static FORMULA_CELL: Lazy<Regex> = Lazy::new(|| Regex::new(r"([A-Z]+)(\d+)").unwrap());

/// A template row's iterative matches: the query they share and the
/// column index → result column mapping accumulated across the row.
struct IterativeGroup {
    query: String,
    columns: BTreeMap<usize, String>,
}

/// Populate `template` with `results`, returning the bound workbook.
/// The template itself is not mutated; the binder works on its own copy.
pub fn sql_to_workbook(template: &Workbook, results: &QueryResultSet) -> BindResult<Workbook> {
    let mut workbook = template.clone();
    for (name, sheet) in workbook.iter_mut() {
        debug!(sheet = %name, "binding sheet");
        bind_sheet(sheet, results);
    }
    Ok(workbook)
}

fn bind_sheet(sheet: &mut Sheet, results: &QueryResultSet) {
    let Some(extent) = sheet.extent() else {
        return;
    };

    // Scan pass: classify placeholder cells inside the declared extent.
    let mut direct: Vec<((usize, usize), (String, usize, String))> = Vec::new();
    let mut iterative: BTreeMap<usize, IterativeGroup> = BTreeMap::new();

    for row in extent.start_row..=extent.end_row {
        for col in extent.start_col..=extent.end_col {
            let Some(cell) = sheet.cell(row, col) else {
                continue;
            };
            let Scalar::Text(text) = &cell.value else {
                continue;
            };
            match QueryRef::first_in(text) {
                Some(QueryRef::Direct {
                    query,
                    index,
                    column,
                }) => direct.push(((row, col), (query, index, column))),
                Some(QueryRef::Iterative { query, column }) => {
                    // All iterative matches in one row share a query name
                    iterative
                        .entry(row)
                        .or_insert_with(|| IterativeGroup {
                            query,
                            columns: BTreeMap::new(),
                        })
                        .columns
                        .insert(col, column);
                }
                None => {}
            }
        }
    }

    debug!(
        direct = direct.len(),
        iterative = iterative.len(),
        "scan pass complete"
    );

    // Direct references first: overwrite each cell whose value resolves.
    for ((row, col), (query, index, column)) in direct {
        let value = results
            .get(&query)
            .and_then(|records| records.get(index))
            .and_then(|record| record.get(&column));
        if let Some(value) = value {
            sheet.set_cell(row, col, Cell::new(value.clone()));
        }
    }

    // Iterative groups in ascending template-row order. Earlier splices
    // shift later groups down, so each group's scan-time row is re-based
    // by the rows inserted so far.
    let mut inserted = 0usize;
    for (scan_row, group) in iterative {
        let records = match results.get(&group.query) {
            Some(records) if !records.is_empty() => records,
            _ => continue,
        };
        let template_row = scan_row + inserted;
        expand_template_row(sheet, template_row, &group, records, &extent);
        inserted += records.len() - 1;
    }

    if inserted > 0 {
        debug!(rows_inserted = inserted, "spliced iterative rows");
    }
    sheet.recompute_extent();
}

/// Expand one iterative template row into `records.len()` rows.
fn expand_template_row(
    sheet: &mut Sheet,
    template_row: usize,
    group: &IterativeGroup,
    records: &[Record],
    extent: &Extent,
) {
    let n = records.len();
    if n > 1 {
        sheet.splice_rows(template_row, n - 1);
    }

    // Snapshot the template row before anything is overwritten: literal
    // and formula cells outside the data columns, and the data columns'
    // styles.
    let mut template_cells: Vec<(usize, Cell)> = Vec::new();
    for col in extent.start_col..=extent.end_col {
        if group.columns.contains_key(&col) {
            continue;
        }
        if let Some(cell) = sheet.cell(template_row, col) {
            template_cells.push((col, cell.clone()));
        }
    }
    let data_styles: BTreeMap<usize, String> = group
        .columns
        .keys()
        .filter_map(|&col| {
            sheet
                .cell(template_row, col)
                .and_then(|cell| cell.style.clone())
                .map(|style| (col, style))
        })
        .collect();

    for (i, record) in records.iter().enumerate() {
        let row = template_row + i;

        // Data columns: one record value per mapped column, keeping the
        // template data cell's style.
        for (&col, column) in &group.columns {
            let mut cell = Cell::new(record.get(column).cloned().unwrap_or(Scalar::Empty));
            if let Some(style) = data_styles.get(&col) {
                cell.style = Some(style.clone());
            }
            sheet.set_cell(row, col, cell);
        }

        // Remaining columns: the template row itself (i = 0) already holds
        // them; generated rows get a copy with formula rows offset by i.
        if i > 0 {
            for (col, template_cell) in &template_cells {
                let mut cell = template_cell.clone();
                if let Some(formula) = &template_cell.formula {
                    cell.formula = Some(offset_formula(formula, i));
                }
                sheet.set_cell(row, *col, cell);
            }
        }
    }
}

/// Rewrite every embedded cell token by adding `offset` to its row
/// number, leaving column letters unchanged: `C2*D2` at offset 1 becomes
/// `C3*D3`.
fn offset_formula(formula: &str, offset: usize) -> String {
    FORMULA_CELL
        .replace_all(formula, |caps: &Captures| match caps[2].parse::<usize>() {
            Ok(row) => format!("{}{}", &caps[1], row + offset),
            Err(_) => caps[0].to_string(),
        })
        .into_owned()
}
