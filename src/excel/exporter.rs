//! Excel exporter implementation - Workbook → Excel (.xlsx)

use crate::error::{GridmapError, GridmapResult};
use crate::sheet::{Workbook, Worksheet};
use crate::types::Cell;
use rust_xlsxwriter::Workbook as XlsxWorkbook;
use std::path::Path;

/// Writes a [`Workbook`] as one worksheet per sheet
pub struct ExcelExporter<'a> {
    book: &'a Workbook,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(book: &'a Workbook) -> Self {
        Self { book }
    }

    /// Export the workbook to an Excel .xlsx file
    pub fn export(&self, output_path: &Path) -> GridmapResult<()> {
        let mut workbook = XlsxWorkbook::new();

        for sheet in &self.book.sheets {
            self.export_sheet(&mut workbook, sheet)?;
        }

        workbook
            .save(output_path)
            .map_err(|e| GridmapError::Workbook(format!("Failed to save Excel file: {}", e)))?;

        Ok(())
    }

    fn export_sheet(&self, workbook: &mut XlsxWorkbook, sheet: &Worksheet) -> GridmapResult<()> {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.title).map_err(|e| {
            GridmapError::Workbook(format!("Failed to set worksheet name: {}", e))
        })?;

        for (row_idx, row) in sheet.rows.iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                let (r, c) = (row_idx as u32, col_idx as u16);
                let written = match cell {
                    Cell::Empty => continue,
                    Cell::Text(s) => worksheet.write_string(r, c, s).map(|_| ()),
                    Cell::Number(n) => worksheet.write_number(r, c, *n).map(|_| ()),
                };
                written.map_err(|e| {
                    GridmapError::Workbook(format!("Failed to write cell: {}", e))
                })?;
            }
        }

        Ok(())
    }
}
