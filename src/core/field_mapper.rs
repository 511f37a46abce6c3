//! Record ↔ sheet header reconciliation for writes
//!
//! [`auto_map_input_data`] reads the sheet header, creates it from the first
//! record when the sheet is empty, and then applies the [`ExtraDataPolicy`] to
//! fields that have no matching column. [`records_to_rows`] is the positional
//! writer that lays records out in header order.

use crate::error::{GridmapError, GridmapResult};
use crate::sheet::{A1Range, SheetIo};
use crate::types::{
    Cell, ExtraDataPolicy, FieldValue, Grid, Record, Row, ValueRenderOption, WriteOptions,
    ROW_NUMBER,
};
use tracing::{debug, info};

/// Per-item, user-declared field values (the UI "fields to send" list)
pub trait ParameterSource {
    fn field_values(&self, item_index: usize) -> Vec<FieldValue>;
}

impl ParameterSource for [Vec<FieldValue>] {
    fn field_values(&self, item_index: usize) -> Vec<FieldValue> {
        self.get(item_index).cloned().unwrap_or_default()
    }
}

impl ParameterSource for Vec<Vec<FieldValue>> {
    fn field_values(&self, item_index: usize) -> Vec<FieldValue> {
        self.as_slice().field_values(item_index)
    }
}

/// Fold each item's declared fields into one record; later duplicates win
pub fn map_fields<P>(source: &P, item_count: usize) -> Vec<Record>
where
    P: ParameterSource + ?Sized,
{
    (0..item_count)
        .map(|i| {
            source
                .field_values(i)
                .into_iter()
                .map(|field| (field.field_id, field.field_value))
                .collect()
        })
        .collect()
}

fn header_range(sheet_name: &str) -> String {
    A1Range {
        start_row: Some(1),
        end_row: Some(1),
        ..A1Range::sheet(sheet_name)
    }
    .to_string()
}

/// Current header of a sheet as text; empty when row 1 is empty
pub async fn read_header<S>(sheet: &S, sheet_name: &str) -> GridmapResult<Vec<String>>
where
    S: SheetIo + ?Sized,
{
    let response = sheet
        .get_data(&header_range(sheet_name), ValueRenderOption::FormattedValue)
        .await?;
    Ok(response
        .into_iter()
        .next()
        .map(|row| row.iter().map(Cell::to_string).collect())
        .unwrap_or_default())
}

/// Reconcile records with the sheet header according to `policy`
///
/// Performs up to three sequential sheet calls: read the header, write a
/// header for an empty sheet, extend the header with new columns. Records
/// come back in input order.
pub async fn auto_map_input_data<S>(
    policy: ExtraDataPolicy,
    sheet_name: &str,
    sheet: &S,
    items: Vec<Record>,
    options: &WriteOptions,
) -> GridmapResult<Vec<Record>>
where
    S: SheetIo + ?Sized,
{
    let mut column_names = read_header(sheet, sheet_name).await?;

    if column_names.is_empty() {
        let Some(first) = items.first() else {
            return Ok(items);
        };
        column_names = first.keys().cloned().collect();
        info!(sheet = sheet_name, columns = ?column_names, "writing header to empty sheet");
        let header: Row = column_names
            .iter()
            .filter(|key| key.as_str() != ROW_NUMBER)
            .map(|key| Cell::Text(key.clone()))
            .collect();
        sheet
            .append_data(sheet_name, vec![header], options.cell_format)
            .await?;
    }

    match policy {
        ExtraDataPolicy::InsertInNewColumn => {
            insert_in_new_column(sheet_name, sheet, items, column_names, options).await
        }
        ExtraDataPolicy::IgnoreIt => Ok(items),
        ExtraDataPolicy::Error => reject_extra_fields(items, &column_names),
    }
}

async fn insert_in_new_column<S>(
    sheet_name: &str,
    sheet: &S,
    mut items: Vec<Record>,
    column_names: Vec<String>,
    options: &WriteOptions,
) -> GridmapResult<Vec<Record>>
where
    S: SheetIo + ?Sized,
{
    let mut new_columns: Vec<String> = Vec::new();

    for item in items.iter_mut() {
        for key in item.keys() {
            if key != ROW_NUMBER && !column_names.contains(key) && !new_columns.contains(key) {
                new_columns.push(key.clone());
            }
        }
        item.shift_remove(ROW_NUMBER);
    }

    if !new_columns.is_empty() {
        info!(sheet = sheet_name, columns = ?new_columns, "extending header");
        let header: Row = column_names
            .into_iter()
            .filter(|key| key != ROW_NUMBER)
            .chain(new_columns)
            .map(Cell::Text)
            .collect();
        sheet
            .update_row(sheet_name, vec![header], options.cell_format, 1)
            .await?;
    }

    Ok(items)
}

fn reject_extra_fields(items: Vec<Record>, column_names: &[String]) -> GridmapResult<Vec<Record>> {
    for (item_index, item) in items.iter().enumerate() {
        if let Some(key) = item.keys().find(|key| !column_names.contains(key)) {
            return Err(GridmapError::SchemaMismatch {
                field: key.clone(),
                item_index,
                description: format!(
                    "The input field '{}' doesn't match any column in the Sheet. \
                     You can ignore this by changing the 'Handling extra data' field",
                    key
                ),
            });
        }
    }
    Ok(items)
}

/// Lay records out in column order; unknown keys are ignored, missing keys are empty
pub fn records_to_rows(column_names: &[String], records: &[Record]) -> Grid {
    records
        .iter()
        .map(|record| {
            column_names
                .iter()
                .map(|name| record.get(name).map(Cell::from_json).unwrap_or_default())
                .collect()
        })
        .collect()
}

/// Outcome of [`append_records`]
#[derive(Debug, Clone, PartialEq)]
pub struct AppendOutcome {
    /// Header after reconciliation
    pub columns: Vec<String>,
    /// Rows appended below the existing data
    pub rows: Grid,
}

/// Reconcile records with the header, then append them as rows
pub async fn append_records<S>(
    policy: ExtraDataPolicy,
    sheet_name: &str,
    sheet: &S,
    items: Vec<Record>,
    options: &WriteOptions,
) -> GridmapResult<AppendOutcome>
where
    S: SheetIo + ?Sized,
{
    let records = auto_map_input_data(policy, sheet_name, sheet, items, options).await?;
    let columns = read_header(sheet, sheet_name).await?;
    let rows = records_to_rows(&columns, &records);

    if !rows.is_empty() {
        debug!(sheet = sheet_name, rows = rows.len(), "appending records");
        sheet
            .append_data(sheet_name, rows.clone(), options.cell_format)
            .await?;
    }

    Ok(AppendOutcome { columns, rows })
}
