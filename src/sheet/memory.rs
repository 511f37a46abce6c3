use super::workbook::trim_row;
use super::{A1Range, SheetIo, SheetMetadata, SheetProperties, Workbook};
use crate::error::{GridmapError, GridmapResult};
use crate::types::{Cell, Grid, Row, ValueInputOption, ValueRenderOption};
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

/// In-process [`SheetIo`] over a [`Workbook`]
#[derive(Debug, Default)]
pub struct MemoryWorkbook {
    book: RwLock<Workbook>,
}

impl MemoryWorkbook {
    pub fn new(book: Workbook) -> Self {
        Self {
            book: RwLock::new(book),
        }
    }

    /// Copy of the current workbook contents
    pub async fn snapshot(&self) -> Workbook {
        self.book.read().await.clone()
    }

    pub fn into_inner(self) -> Workbook {
        self.book.into_inner()
    }
}

fn render_cell(cell: &Cell, render: ValueRenderOption) -> Cell {
    match (render, cell) {
        (ValueRenderOption::FormattedValue, Cell::Number(_)) => Cell::Text(cell.to_string()),
        _ => cell.clone(),
    }
}

fn input_cell(cell: Cell, input: ValueInputOption) -> Cell {
    match (input, cell) {
        (ValueInputOption::UserEntered, Cell::Text(s)) => match s.trim().parse::<f64>() {
            Ok(n) if !s.trim().is_empty() && n.is_finite() => Cell::Number(n),
            _ => Cell::Text(s),
        },
        (_, cell) => cell,
    }
}

fn input_rows(rows: Grid, input: ValueInputOption) -> Vec<Row> {
    rows.into_iter()
        .map(|row| row.into_iter().map(|c| input_cell(c, input)).collect())
        .collect()
}

#[async_trait]
impl SheetIo for MemoryWorkbook {
    async fn get_data(&self, range: &str, render: ValueRenderOption) -> GridmapResult<Grid> {
        let range = A1Range::parse(range)?;
        let book = self.book.read().await;
        let sheet = book
            .sheet(&range.sheet)
            .ok_or_else(|| GridmapError::SheetNotFound(range.sheet.clone()))?;

        let mut grid: Grid = sheet.rows[range.row_span(sheet.rows.len())]
            .iter()
            .map(|row| {
                let cells = row[range.col_span(row.len())]
                    .iter()
                    .map(|cell| render_cell(cell, render))
                    .collect();
                trim_row(cells)
            })
            .collect();

        // Trailing empty rows are not returned
        while grid.last().is_some_and(|row| row.is_empty()) {
            grid.pop();
        }

        debug!(range = %range, rows = grid.len(), "read range");
        Ok(grid)
    }

    async fn append_data(
        &self,
        sheet_name: &str,
        rows: Grid,
        input: ValueInputOption,
    ) -> GridmapResult<()> {
        let mut book = self.book.write().await;
        let sheet = book
            .sheet_mut(sheet_name)
            .ok_or_else(|| GridmapError::SheetNotFound(sheet_name.to_string()))?;

        let used = sheet.used_rows();
        sheet.rows.truncate(used);
        debug!(sheet = sheet_name, after_row = used, rows = rows.len(), "append rows");
        sheet
            .rows
            .extend(input_rows(rows, input).into_iter().map(trim_row));
        Ok(())
    }

    async fn update_row(
        &self,
        sheet_name: &str,
        rows: Grid,
        input: ValueInputOption,
        start_row: usize,
    ) -> GridmapResult<()> {
        let mut book = self.book.write().await;
        let sheet = book
            .sheet_mut(sheet_name)
            .ok_or_else(|| GridmapError::SheetNotFound(sheet_name.to_string()))?;

        let start = start_row.saturating_sub(1);
        debug!(sheet = sheet_name, start_row, rows = rows.len(), "update rows");
        for (offset, new_row) in input_rows(rows, input).into_iter().enumerate() {
            let index = start + offset;
            if sheet.rows.len() <= index {
                sheet.rows.resize_with(index + 1, Vec::new);
            }
            let target = &mut sheet.rows[index];
            if target.len() < new_row.len() {
                target.resize(new_row.len(), Cell::Empty);
            }
            for (col, cell) in new_row.into_iter().enumerate() {
                target[col] = cell;
            }
            *target = trim_row(std::mem::take(target));
        }
        Ok(())
    }

    async fn spreadsheet_get_sheets(&self) -> GridmapResult<Vec<SheetMetadata>> {
        let book = self.book.read().await;
        Ok(book
            .sheets
            .iter()
            .enumerate()
            .map(|(index, sheet)| SheetMetadata {
                properties: Some(SheetProperties {
                    sheet_id: Some(index as u64),
                    title: Some(sheet.title.clone()),
                    index: Some(index),
                }),
            })
            .collect())
    }
}
