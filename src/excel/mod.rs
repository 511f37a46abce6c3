//! Excel import/export for workbooks
//!
//! - Import: Excel/ODS → [`Workbook`](crate::sheet::Workbook) via calamine
//! - Export: [`Workbook`](crate::sheet::Workbook) → .xlsx via rust_xlsxwriter

mod exporter;
mod importer;

pub use exporter::ExcelExporter;
pub use importer::ExcelImporter;
