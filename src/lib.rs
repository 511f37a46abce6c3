//! Gridmap - tabular range detection and record mapping for spreadsheets
//!
//! This library finds the real table inside a loosely-structured sheet range
//! (header row, first data row, boundaries) and maps application records back
//! onto a sheet's existing column layout when writing.
//!
//! # Features
//!
//! - Automatic range detection: leading empty rows/columns, stop at first empty row
//! - Explicit ranges with 1-based header / first-data rows
//! - Bijective base-26 column addressing (A, Z, AA, ...)
//! - Header reconciliation with insert / ignore / error policies for extra fields
//! - In-memory workbook backed by YAML, JSON or Excel files
//!
//! # Example
//!
//! ```
//! use royalbit_gridmap::core::prepare_sheet_data;
//! use royalbit_gridmap::types::{Cell, RangeDefinition};
//!
//! let grid = vec![
//!     vec![],
//!     vec![Cell::from("name"), Cell::from("age")],
//!     vec![Cell::from("Ada"), Cell::Number(36.0)],
//! ];
//! let shaped = prepare_sheet_data(grid, &RangeDefinition::default(), true);
//!
//! assert_eq!(shaped.header_row, 0);
//! assert_eq!(shaped.data.len(), 2);
//! assert_eq!(shaped.data[0][0], Cell::from("row_number"));
//! ```

pub mod api;
pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod sheet;
pub mod types;

// Re-export commonly used types
pub use error::{GridmapError, GridmapResult};
pub use sheet::{MemoryWorkbook, SheetIo, Workbook, Worksheet};
pub use types::{
    Cell, ExtraDataPolicy, Grid, RangeDefinition, ReadRowsUntil, Record, ShapedRange,
    WriteOptions, ROW_NUMBER,
};
