//! Range detection and record mapping core

pub mod color;
pub mod column;
pub mod field_mapper;
pub mod locator;
pub mod range_shaper;

pub use color::{hex_to_rgb, Rgb};
pub use column::{column_name_to_number, column_number_to_name, parse_column_name};
pub use field_mapper::{
    append_records, auto_map_input_data, map_fields, read_header, records_to_rows,
    AppendOutcome, ParameterSource,
};
pub use locator::{extract_resource_id, get_spreadsheet_id};
pub use range_shaper::{
    add_row_number, get_existing_sheet_names, get_range_string, prepare_sheet_data,
    trim_leading_empty_columns, trim_leading_empty_rows, trim_leading_empty_rows_default,
    trim_to_first_empty_row,
};

/// Column letter name for a 1-based ordinal (1 → A)
pub fn get_column_name(column_number: usize) -> String {
    column_number_to_name(column_number)
}

/// 1-based ordinal for an uppercase column name (AA → 27)
pub fn get_column_number(column_name: &str) -> usize {
    column_name_to_number(column_name)
}
