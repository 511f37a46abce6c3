//! Range detection over raw sheet grids
//!
//! Turns the rows fetched for a range into a [`ShapedRange`]: optional row
//! numbering, then (in automatic mode) trimming of leading empty rows, leading
//! empty columns and, optionally, everything from the first empty row on.
//!
//! All transforms take the grid by value and return a new grid; none of them
//! can fail.

use crate::core::column::column_number_to_name;
use crate::error::GridmapResult;
use crate::sheet::SheetIo;
use crate::types::{Cell, Grid, RangeDefinition, ReadRowsUntil, Record, ShapedRange, ROW_NUMBER};
use tracing::debug;

/// Prefix each row with its 1-based index; the first row gets the `row_number` label
pub fn add_row_number(grid: Grid) -> Grid {
    grid.into_iter()
        .enumerate()
        .map(|(i, row)| {
            let lead = if i == 0 {
                Cell::Text(ROW_NUMBER.to_string())
            } else {
                Cell::Number((i + 1) as f64)
            };
            std::iter::once(lead).chain(row).collect()
        })
        .collect()
}

fn base_length(includes_row_number: bool) -> usize {
    if includes_row_number {
        1
    } else {
        0
    }
}

/// Drop rows before the first row carrying data beyond the row-number cell
///
/// With row numbers, the new first row's leading cell is relabelled with
/// `row_numbers_column_name`. A grid with no such row is returned unchanged.
pub fn trim_leading_empty_rows(
    grid: Grid,
    includes_row_number: bool,
    row_numbers_column_name: &str,
) -> Grid {
    let base = base_length(includes_row_number);
    let Some(first) = grid.iter().position(|row| row.len() > base) else {
        return grid;
    };

    if first > 0 {
        debug!(rows = first, "trimmed leading empty rows");
    }

    let mut trimmed: Grid = grid.into_iter().skip(first).collect();
    if includes_row_number {
        if let Some(lead) = trimmed.first_mut().and_then(|row| row.first_mut()) {
            *lead = Cell::Text(row_numbers_column_name.to_string());
        }
    }
    trimmed
}

/// [`trim_leading_empty_rows`] with the default `row_number` label
pub fn trim_leading_empty_rows_default(grid: Grid, includes_row_number: bool) -> Grid {
    trim_leading_empty_rows(grid, includes_row_number, ROW_NUMBER)
}

/// Truncate at the first row with no data cells; that row and all after are dropped
pub fn trim_to_first_empty_row(mut grid: Grid, includes_row_number: bool) -> Grid {
    let base = base_length(includes_row_number);
    if let Some(empty) = grid.iter().position(|row| row.len() == base) {
        debug!(at = empty, dropped = grid.len() - empty, "truncated at first empty row");
        grid.truncate(empty);
    }
    grid
}

/// Delete blank columns contiguous from the left edge of the data
///
/// Scanning starts at the first data column (after the row-number column when
/// present). A column is blank when every row's cell there is [`Cell::is_blank`]
/// or absent. Stops at the first non-blank column.
pub fn trim_leading_empty_columns(mut grid: Grid, includes_row_number: bool) -> Grid {
    let first_column = base_length(includes_row_number);
    let longest = grid.iter().map(Vec::len).max().unwrap_or(0);
    let mut removed = 0;

    for _ in first_column..longest {
        let has_data = grid
            .iter()
            .any(|row| row.get(first_column).is_some_and(|cell| !cell.is_blank()));
        if has_data {
            break;
        }
        for row in grid.iter_mut().filter(|row| row.len() > first_column) {
            row.remove(first_column);
        }
        removed += 1;
    }

    if removed > 0 {
        debug!(columns = removed, "trimmed leading empty columns");
    }
    grid
}

/// Shape raw range rows into data plus 0-based header and first-data row indices
pub fn prepare_sheet_data(
    grid: Grid,
    options: &RangeDefinition,
    add_row_numbers: bool,
) -> ShapedRange {
    let mut data = if add_row_numbers {
        add_row_number(grid)
    } else {
        grid
    };

    let (header_row, first_data_row) = match options {
        RangeDefinition::DetectAutomatically { read_rows_until } => {
            data = trim_leading_empty_rows_default(data, add_row_numbers);
            data = trim_leading_empty_columns(data, add_row_numbers);
            if *read_rows_until == ReadRowsUntil::FirstEmptyRow {
                data = trim_to_first_empty_row(data, add_row_numbers);
            }
            (0, 1)
        }
        RangeDefinition::SpecifyRange {
            header_row,
            first_data_row,
            ..
        } => (header_row.saturating_sub(1), first_data_row.saturating_sub(1)),
    };

    debug!(rows = data.len(), header_row, first_data_row, "prepared sheet data");
    ShapedRange {
        data,
        header_row,
        first_data_row,
    }
}

/// `Sheet!range` for an explicit non-empty range, else the bare sheet name
pub fn get_range_string(sheet_name: &str, options: &RangeDefinition) -> String {
    match options {
        RangeDefinition::SpecifyRange {
            range: Some(range), ..
        } if !range.is_empty() => format!("{}!{}", sheet_name, range),
        _ => sheet_name.to_string(),
    }
}

/// Sheet titles in workbook order; entries without a title are skipped
pub async fn get_existing_sheet_names<S>(sheet: &S) -> GridmapResult<Vec<String>>
where
    S: SheetIo + ?Sized,
{
    let sheets = sheet.spreadsheet_get_sheets().await?;
    Ok(sheets
        .into_iter()
        .filter_map(|meta| meta.properties.and_then(|p| p.title))
        .collect())
}

impl ShapedRange {
    /// Column keys taken from the header row
    ///
    /// Blank header cells are named `col_<letter>` after their position.
    pub fn column_names(&self) -> Vec<String> {
        let header = self.data.get(self.header_row).map(Vec::as_slice).unwrap_or(&[]);
        let width = self
            .data
            .iter()
            .skip(self.first_data_row)
            .map(Vec::len)
            .chain(std::iter::once(header.len()))
            .max()
            .unwrap_or(0);

        (0..width)
            .map(|i| match header.get(i) {
                Some(cell) if !cell.is_blank() => cell.to_string(),
                _ => format!("col_{}", column_number_to_name(i + 1)),
            })
            .collect()
    }

    /// Data rows from `first_data_row` on, keyed by [`column_names`](Self::column_names)
    ///
    /// Cells missing from a short row are left out of its record.
    pub fn into_records(self) -> Vec<Record> {
        let columns = self.column_names();
        self.data
            .into_iter()
            .skip(self.first_data_row)
            .map(|row| {
                columns
                    .iter()
                    .zip(row)
                    .map(|(name, cell)| (name.clone(), cell.to_json()))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Cell {
        Cell::from(s)
    }

    fn n(v: f64) -> Cell {
        Cell::Number(v)
    }

    #[test]
    fn test_add_row_number() {
        let grid = vec![vec![t("a")], vec![t("b")], vec![]];
        assert_eq!(
            add_row_number(grid),
            vec![vec![t(ROW_NUMBER), t("a")], vec![n(2.0), t("b")], vec![n(3.0)]]
        );
        assert!(add_row_number(Vec::new()).is_empty());
    }

    #[test]
    fn test_trim_leading_empty_rows_relabels() {
        let grid = vec![vec![t(ROW_NUMBER)], vec![n(2.0)], vec![n(3.0), t("h")], vec![n(4.0), t("v")]];
        assert_eq!(
            trim_leading_empty_rows(grid, true, "idx"),
            vec![vec![t("idx"), t("h")], vec![n(4.0), t("v")]]
        );
    }

    #[test]
    fn test_trim_leading_empty_rows_all_empty_unchanged() {
        let grid = vec![vec![n(1.0)], vec![n(2.0)]];
        assert_eq!(trim_leading_empty_rows_default(grid.clone(), true), grid);
    }

    #[test]
    fn test_trim_leading_empty_rows_without_row_numbers() {
        let grid = vec![vec![], vec![t("h")]];
        assert_eq!(trim_leading_empty_rows_default(grid, false), vec![vec![t("h")]]);
    }

    #[test]
    fn test_trim_to_first_empty_row() {
        let grid = vec![vec![n(1.0), t("a")], vec![n(2.0), t("b")], vec![n(3.0)], vec![n(4.0), t("c")]];
        assert_eq!(
            trim_to_first_empty_row(grid, true),
            vec![vec![n(1.0), t("a")], vec![n(2.0), t("b")]]
        );
    }

    #[test]
    fn test_trim_leading_empty_columns_keeps_zero() {
        let grid = vec![vec![n(1.0), t(""), n(0.0)], vec![n(2.0)]];
        assert_eq!(
            trim_leading_empty_columns(grid, true),
            vec![vec![n(1.0), n(0.0)], vec![n(2.0)]]
        );
    }

    #[test]
    fn test_trim_leading_empty_columns_is_contiguous() {
        let grid = vec![vec![t(""), t("x"), t(""), t("y")]];
        assert_eq!(
            trim_leading_empty_columns(grid, false),
            vec![vec![t("x"), t(""), t("y")]]
        );
    }

    #[test]
    fn test_trim_leading_empty_columns_all_blank() {
        let grid = vec![vec![n(1.0), t(""), Cell::Empty], vec![n(2.0), t("")]];
        assert_eq!(
            trim_leading_empty_columns(grid, true),
            vec![vec![n(1.0)], vec![n(2.0)]]
        );
    }

    #[test]
    fn test_get_range_string() {
        let specify = RangeDefinition::SpecifyRange {
            range: Some("A1:C5".to_string()),
            header_row: 1,
            first_data_row: 2,
        };
        assert_eq!(get_range_string("Sheet1", &specify), "Sheet1!A1:C5");

        let blank = RangeDefinition::SpecifyRange {
            range: Some(String::new()),
            header_row: 1,
            first_data_row: 2,
        };
        assert_eq!(get_range_string("Sheet1", &blank), "Sheet1");
        assert_eq!(get_range_string("Sheet1", &RangeDefinition::default()), "Sheet1");
    }

    #[test]
    fn test_column_names_fill_blank_headers() {
        let shaped = ShapedRange {
            data: vec![vec![t("a"), t("")], vec![n(1.0), n(2.0), n(3.0)]],
            header_row: 0,
            first_data_row: 1,
        };
        assert_eq!(shaped.column_names(), vec!["a", "col_B", "col_C"]);
    }

    #[test]
    fn test_into_records() {
        let shaped = ShapedRange {
            data: vec![vec![t("name"), t("age")], vec![t("Ada"), n(36.0)], vec![t("Bob")]],
            header_row: 0,
            first_data_row: 1,
        };
        let records = shaped.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], "Ada");
        assert_eq!(records[0]["age"], 36.0);
        assert!(!records[1].contains_key("age"));
    }
}
