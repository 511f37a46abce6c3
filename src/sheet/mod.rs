//! Sheet I/O seam
//!
//! The shaping and mapping core never talks to a data source directly; it goes
//! through [`SheetIo`]. [`MemoryWorkbook`] is the in-process implementation used
//! by the CLI, the API server and the tests. [`Workbook`] is its plain-data form,
//! loadable from YAML, JSON or Excel files.

mod memory;
pub mod range;
mod workbook;

pub use memory::MemoryWorkbook;
pub use range::A1Range;
pub use workbook::{Workbook, Worksheet};
pub(crate) use workbook::trim_row;

use crate::error::GridmapResult;
use crate::types::{Grid, ValueInputOption, ValueRenderOption};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Per-sheet metadata as reported by the data source
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SheetMetadata {
    #[serde(default)]
    pub properties: Option<SheetProperties>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    #[serde(default)]
    pub sheet_id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub index: Option<usize>,
}

/// Range reads and writes against one spreadsheet
#[async_trait]
pub trait SheetIo: Send + Sync {
    /// Read the cells addressed by an A1 range string (`Sheet1!A1:C10`)
    async fn get_data(&self, range: &str, render: ValueRenderOption) -> GridmapResult<Grid>;

    /// Append rows after the last non-empty row of a sheet
    async fn append_data(
        &self,
        sheet_name: &str,
        rows: Grid,
        input: ValueInputOption,
    ) -> GridmapResult<()>;

    /// Overwrite rows starting at the 1-based `start_row`
    async fn update_row(
        &self,
        sheet_name: &str,
        rows: Grid,
        input: ValueInputOption,
        start_row: usize,
    ) -> GridmapResult<()>;

    /// Metadata for every sheet, in workbook order
    async fn spreadsheet_get_sheets(&self) -> GridmapResult<Vec<SheetMetadata>>;
}
