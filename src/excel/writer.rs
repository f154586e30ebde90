//! Xlsx writing - Workbook → Excel (.xlsx)

use crate::error::{BindError, BindResult};
use crate::types::{Scalar, Workbook};
use rust_xlsxwriter::{Formula, Workbook as XlsxWorkbook};
use std::path::Path;
use tracing::debug;

/// Save a workbook to an .xlsx file. Formula cells are written as
/// formulas (numeric-typed on output); other cells by their value tag.
pub fn write_workbook(workbook: &Workbook, path: &Path) -> BindResult<()> {
    let mut xlsx = XlsxWorkbook::new();

    for (name, sheet) in workbook.iter() {
        let worksheet = xlsx.add_worksheet();
        worksheet
            .set_name(name.as_str())
            .map_err(|e| BindError::Export(format!("Failed to set worksheet name: {}", e)))?;

        // Deterministic cell order for stable output
        let mut cells: Vec<_> = sheet.cells().collect();
        cells.sort_by_key(|(pos, _)| *pos);

        for ((row, col), cell) in cells {
            let (row, col) = (row as u32, col as u16);
            if let Some(formula) = &cell.formula {
                worksheet
                    .write_formula(row, col, Formula::new(formula.as_str()))
                    .map_err(|e| BindError::Export(format!("Failed to write formula: {}", e)))?;
                continue;
            }
            match &cell.value {
                Scalar::Number(n) => {
                    worksheet
                        .write_number(row, col, *n)
                        .map_err(|e| BindError::Export(format!("Failed to write number: {}", e)))?;
                }
                Scalar::Text(s) => {
                    worksheet
                        .write_string(row, col, s.as_str())
                        .map_err(|e| BindError::Export(format!("Failed to write text: {}", e)))?;
                }
                Scalar::Empty => {}
            }
        }

        for (col, width) in sheet.column_widths() {
            worksheet
                .set_column_width(col as u16, width)
                .map_err(|e| BindError::Export(format!("Failed to set column width: {}", e)))?;
        }
        debug!(sheet = %name, "wrote sheet");
    }

    xlsx.save(path)
        .map_err(|e| BindError::Export(format!("Failed to save Excel file: {}", e)))?;

    Ok(())
}
