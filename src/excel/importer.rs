//! Excel importer implementation - Excel/ODS → Workbook

use crate::error::{GridmapError, GridmapResult};
use crate::sheet::{trim_row, Workbook, Worksheet};
use crate::types::{Cell, Grid};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;
use tracing::debug;

/// Reads every worksheet of a spreadsheet file into a [`Workbook`]
pub struct ExcelImporter {
    path: std::path::PathBuf,
}

impl ExcelImporter {
    /// Create a new Excel importer
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Import all sheets, keeping absolute cell positions
    pub fn import(&self) -> GridmapResult<Workbook> {
        let mut workbook = open_workbook_auto(&self.path)
            .map_err(|e| GridmapError::Workbook(format!("Failed to open Excel file: {}", e)))?;

        let mut book = Workbook::default();
        let sheet_names = workbook.sheet_names().to_vec();

        for sheet_name in sheet_names {
            let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
                GridmapError::Workbook(format!("Failed to read sheet '{}': {}", sheet_name, e))
            })?;
            let rows = self.range_to_grid(&range);
            debug!(sheet = %sheet_name, rows = rows.len(), "imported sheet");
            book.sheets.push(Worksheet::new(sheet_name, rows));
        }

        Ok(book)
    }

    /// calamine ranges start at the first used cell; pad back to A1
    fn range_to_grid(&self, range: &Range<Data>) -> Grid {
        let Some((row_offset, col_offset)) = range.start() else {
            return Vec::new();
        };

        let mut grid: Grid = vec![Vec::new(); row_offset as usize];
        for row in range.rows() {
            let mut cells = vec![Cell::Empty; col_offset as usize];
            cells.extend(row.iter().map(Self::convert_cell));
            grid.push(trim_row(cells));
        }
        grid
    }

    fn convert_cell(data: &Data) -> Cell {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(true) => Cell::Text("TRUE".to_string()),
            Data::Bool(false) => Cell::Text("FALSE".to_string()),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            other => Cell::Text(other.to_string()),
        }
    }
}
