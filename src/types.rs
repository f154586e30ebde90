use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

//==============================================================================
// Scalar values
//==============================================================================

/// A tagged scalar value flowing through both binding directions.
///
/// Query results, cell values and generated text all use this one type, so
/// type-tagging of generated cells is total: a value is a number, text, or
/// empty, never an uninspected "any".
///
/// The untagged serde representation matches query-result JSON directly:
/// `7246.75` → `Number`, `"Widget"` → `Text`, `null` → `Empty`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Numeric value (f64)
    Number(f64),
    /// Text value
    Text(String),
    /// Absent / null value
    Empty,
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::Empty
    }
}

impl Scalar {
    pub fn is_empty(&self) -> bool {
        matches!(self, Scalar::Empty)
    }
}

impl std::fmt::Display for Scalar {
    /// Plain string coercion with no quoting or escaping; quoting is the
    /// template author's responsibility.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Empty => Ok(()),
        }
    }
}

/// One row of a named result sequence: column name → scalar value.
/// Column order within a record is not significant.
pub type Record = HashMap<String, Scalar>;

/// Query name → ordered result records. Record order drives row
/// generation order in the forward direction.
pub type QueryResultSet = HashMap<String, Vec<Record>>;

//==============================================================================
// Cells and sheets
//==============================================================================

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub value: Scalar,
    /// Formula text, e.g. `C2*D2`. A cell carrying a formula is written
    /// out as numeric-typed regardless of its value tag.
    pub formula: Option<String>,
    /// Opaque style token. Copied around by the binder, never interpreted.
    pub style: Option<String>,
}

impl Cell {
    pub fn new(value: Scalar) -> Self {
        Self {
            value,
            formula: None,
            style: None,
        }
    }

    pub fn with_formula(mut self, formula: impl Into<String>) -> Self {
        self.formula = Some(formula.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }
}

/// Rectangular bounding box of populated cells, 0-based inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl Extent {
    fn cover(&mut self, row: usize, col: usize) {
        self.start_row = self.start_row.min(row);
        self.start_col = self.start_col.min(col);
        self.end_row = self.end_row.max(row);
        self.end_col = self.end_col.max(col);
    }
}

/// A sparse grid of cells with a declared extent.
///
/// Invariant: after any mutation the extent covers every populated cell.
/// The extent only grows (structural insertion extends it); it is never
/// silently shrunk.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    cells: HashMap<(usize, usize), Cell>,
    extent: Option<Extent>,
    column_widths: HashMap<usize, f64>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Insert a cell, extending the extent to cover it.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells.insert((row, col), cell);
        match &mut self.extent {
            Some(extent) => extent.cover(row, col),
            None => {
                self.extent = Some(Extent {
                    start_row: row,
                    start_col: col,
                    end_row: row,
                    end_col: col,
                });
            }
        }
    }

    pub fn set_value(&mut self, row: usize, col: usize, value: Scalar) {
        self.set_cell(row, col, Cell::new(value));
    }

    pub fn extent(&self) -> Option<Extent> {
        self.extent
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn column_width(&self, col: usize) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    pub fn set_column_width(&mut self, col: usize, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn column_widths(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.column_widths.iter().map(|(&c, &w)| (c, w))
    }

    /// Iterate populated cells in unspecified order.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), &Cell)> {
        self.cells.iter().map(|(&pos, cell)| (pos, cell))
    }

    /// Shift every row strictly below `after_row` down by `count` rows,
    /// leaving `count` blank rows in the gap, and grow the extent's row
    /// bound to match.
    pub fn splice_rows(&mut self, after_row: usize, count: usize) {
        if count == 0 {
            return;
        }
        let moved: Vec<((usize, usize), Cell)> = self
            .cells
            .iter()
            .filter(|((row, _), _)| *row > after_row)
            .map(|(&pos, cell)| (pos, cell.clone()))
            .collect();
        for (pos, _) in &moved {
            self.cells.remove(pos);
        }
        for ((row, col), cell) in moved {
            self.cells.insert((row + count, col), cell);
        }
        if let Some(extent) = &mut self.extent {
            extent.end_row += count;
        }
    }

    /// Recompute the extent as the union of the populated bounding box and
    /// the current extent. Grow-only: a declared extent larger than the
    /// populated area is kept.
    pub fn recompute_extent(&mut self) {
        let mut recomputed = self.extent;
        for &(row, col) in self.cells.keys() {
            match &mut recomputed {
                Some(extent) => extent.cover(row, col),
                None => {
                    recomputed = Some(Extent {
                        start_row: row,
                        start_col: col,
                        end_row: row,
                        end_col: col,
                    });
                }
            }
        }
        self.extent = recomputed;
    }

    /// Greatest row inside the extent holding a non-empty value in
    /// `col`, clamped to at least `start_row`. Resolves the effective end
    /// of an open range.
    pub fn last_populated_row(&self, col: usize, start_row: usize) -> usize {
        let mut last = start_row;
        if let Some(extent) = self.extent {
            for row in extent.start_row..=extent.end_row {
                if let Some(cell) = self.cells.get(&(row, col)) {
                    if !cell.value.is_empty() {
                        last = last.max(row);
                    }
                }
            }
        }
        last
    }
}

//==============================================================================
// Workbook
//==============================================================================

/// An ordered mapping from sheet name to sheet. Names are unique;
/// insertion order is display order.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: IndexMap<String, Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, name: impl Into<String>, sheet: Sheet) {
        self.sheets.insert(name.into(), sheet);
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.get(name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.get_mut(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Sheet)> {
        self.sheets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Sheet)> {
        self.sheets.iter_mut()
    }

    pub fn sheet_names(&self) -> Vec<&String> {
        self.sheets.keys().collect()
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
