//! Xlsx reading - Excel (.xlsx) → Workbook

use crate::error::{BindError, BindResult};
use crate::types::{Scalar, Sheet, Workbook};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::Path;
use tracing::debug;

/// Load an .xlsx file into the engine's workbook abstraction. Sheet order
/// follows the file's sheet order. Cell positions are absolute: a sheet
/// whose data starts at C5 keeps those coordinates.
pub fn read_workbook(path: &Path) -> BindResult<Workbook> {
    let mut xlsx: Xlsx<_> = open_workbook(path)
        .map_err(|e| BindError::Import(format!("Failed to open Excel file: {}", e)))?;

    let mut workbook = Workbook::new();
    let sheet_names = xlsx.sheet_names().to_vec();

    for name in sheet_names {
        let mut sheet = Sheet::new();
        if let Ok(range) = xlsx.worksheet_range(&name) {
            read_values(&range, &mut sheet);
        }
        if let Ok(formulas) = xlsx.worksheet_formula(&name) {
            read_formulas(&formulas, &mut sheet);
        }
        debug!(sheet = %name, empty = sheet.is_empty(), "read sheet");
        workbook.add_sheet(name, sheet);
    }

    Ok(workbook)
}

fn read_values(range: &Range<Data>, sheet: &mut Sheet) {
    let Some((start_row, start_col)) = range.start() else {
        return;
    };
    let (height, width) = range.get_size();

    for r in 0..height {
        for c in 0..width {
            let Some(data) = range.get((r, c)) else {
                continue;
            };
            let value = match data {
                Data::Int(i) => Scalar::Number(*i as f64),
                Data::Float(f) => Scalar::Number(*f),
                Data::String(s) => Scalar::Text(s.clone()),
                Data::Bool(b) => Scalar::Text(b.to_string()),
                Data::DateTime(dt) => Scalar::Number(dt.as_f64()),
                Data::DateTimeIso(s) | Data::DurationIso(s) => Scalar::Text(s.clone()),
                Data::Error(_) | Data::Empty => continue,
            };
            sheet.set_value(start_row as usize + r, start_col as usize + c, value);
        }
    }
}

fn read_formulas(range: &Range<String>, sheet: &mut Sheet) {
    let Some((start_row, start_col)) = range.start() else {
        return;
    };
    let (height, width) = range.get_size();

    for r in 0..height {
        for c in 0..width {
            let Some(formula) = range.get((r, c)) else {
                continue;
            };
            if formula.is_empty() {
                continue;
            }
            let row = start_row as usize + r;
            let col = start_col as usize + c;
            let mut cell = sheet.cell(row, col).cloned().unwrap_or_default();
            cell.formula = Some(formula.clone());
            sheet.set_cell(row, col, cell);
        }
    }
}
