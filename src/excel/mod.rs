//! Xlsx codec adapter.
//!
//! The binding engine only sees the in-memory [`Workbook`] abstraction;
//! this module is the sole library-specific surface. Reading goes through
//! calamine, writing through rust_xlsxwriter. Opaque style tokens live in
//! the in-memory model only and do not cross the xlsx boundary.

mod reader;
mod writer;

pub use reader::read_workbook;
pub use writer::write_workbook;

use crate::error::BindResult;
use crate::types::Workbook;
use std::path::Path;

/// Pluggable spreadsheet codec: load a file into the engine's workbook
/// abstraction and save one back out.
pub trait WorkbookCodec {
    fn load(&self, path: &Path) -> BindResult<Workbook>;
    fn save(&self, workbook: &Workbook, path: &Path) -> BindResult<()>;
}

/// The default codec, backed by calamine and rust_xlsxwriter.
pub struct XlsxCodec;

impl WorkbookCodec for XlsxCodec {
    fn load(&self, path: &Path) -> BindResult<Workbook> {
        read_workbook(path)
    }

    fn save(&self, workbook: &Workbook, path: &Path) -> BindResult<()> {
        write_workbook(workbook, path)
    }
}
