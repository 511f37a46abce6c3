use crate::error::{GridmapError, GridmapResult};
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::types::{Cell, Grid};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A named sheet holding a sparse grid
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Worksheet {
    pub title: String,
    #[serde(default)]
    pub rows: Grid,
}

impl Worksheet {
    pub fn new(title: impl Into<String>, rows: Grid) -> Self {
        Self {
            title: title.into(),
            rows,
        }
    }

    /// Number of rows up to and including the last row with a non-blank cell
    pub fn used_rows(&self) -> usize {
        self.rows
            .iter()
            .rposition(|row| row.iter().any(|cell| !cell.is_blank()))
            .map(|i| i + 1)
            .unwrap_or(0)
    }
}

/// Plain-data workbook: ordered sheets
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(default)]
    pub sheets: Vec<Worksheet>,
}

impl Workbook {
    pub fn new(sheets: Vec<Worksheet>) -> Self {
        Self { sheets }
    }

    pub fn sheet(&self, title: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|s| s.title == title)
    }

    pub fn sheet_mut(&mut self, title: &str) -> Option<&mut Worksheet> {
        self.sheets.iter_mut().find(|s| s.title == title)
    }

    /// Get a sheet, creating an empty one at the end if missing
    pub fn sheet_or_insert(&mut self, title: &str) -> &mut Worksheet {
        let index = match self.sheets.iter().position(|s| s.title == title) {
            Some(index) => index,
            None => {
                self.sheets.push(Worksheet::new(title, Vec::new()));
                self.sheets.len() - 1
            }
        };
        &mut self.sheets[index]
    }

    /// Load from `.yaml`/`.yml`, `.json`, or an Excel/ODS file
    pub fn load(path: &Path) -> GridmapResult<Self> {
        debug!(path = %path.display(), "loading workbook");
        match extension(path).as_str() {
            "yaml" | "yml" => Ok(serde_yaml::from_str(&fs::read_to_string(path)?)?),
            "json" => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => ExcelImporter::new(path).import(),
            other => Err(GridmapError::Workbook(format!(
                "unsupported workbook format '{}' ({})",
                other,
                path.display()
            ))),
        }
    }

    /// Save to `.yaml`/`.yml`, `.json` or `.xlsx`
    pub fn save(&self, path: &Path) -> GridmapResult<()> {
        debug!(path = %path.display(), sheets = self.sheets.len(), "saving workbook");
        match extension(path).as_str() {
            "yaml" | "yml" => fs::write(path, serde_yaml::to_string(self)?)?,
            "json" => fs::write(path, serde_json::to_string_pretty(self)?)?,
            "xlsx" => ExcelExporter::new(self).export(path)?,
            other => {
                return Err(GridmapError::Workbook(format!(
                    "cannot save workbook as '{}' ({})",
                    other,
                    path.display()
                )))
            }
        }
        Ok(())
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Drop trailing blank cells so rows stay sparse
pub(crate) fn trim_row(mut row: Vec<Cell>) -> Vec<Cell> {
    while row.last().is_some_and(Cell::is_blank) {
        row.pop();
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Workbook {
        Workbook::new(vec![
            Worksheet::new(
                "People",
                vec![
                    vec![Cell::from("name"), Cell::from("age")],
                    vec![Cell::from("Ada"), Cell::Number(36.0)],
                ],
            ),
            Worksheet::new("Empty", Vec::new()),
        ])
    }

    #[test]
    fn test_used_rows_ignores_trailing_blank_rows() {
        let sheet = Worksheet::new(
            "s",
            vec![vec![Cell::from("a")], vec![], vec![Cell::from("")]],
        );
        assert_eq!(sheet.used_rows(), 1);
        assert_eq!(Worksheet::default().used_rows(), 0);
    }

    #[test]
    fn test_sheet_or_insert() {
        let mut book = sample();
        book.sheet_or_insert("New").rows.push(vec![Cell::from("x")]);
        assert_eq!(book.sheets.len(), 3);
        assert_eq!(book.sheet("New").unwrap().rows.len(), 1);
        book.sheet_or_insert("People");
        assert_eq!(book.sheets.len(), 3);
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.yaml");
        sample().save(&path).unwrap();
        assert_eq!(Workbook::load(&path).unwrap(), sample());
    }

    #[test]
    fn test_json_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.json");
        sample().save(&path).unwrap();
        assert_eq!(Workbook::load(&path).unwrap(), sample());
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("book.txt");
        assert!(matches!(
            sample().save(&path),
            Err(GridmapError::Workbook(_))
        ));
        assert!(matches!(
            Workbook::load(&path),
            Err(GridmapError::Workbook(_))
        ));
    }

    #[test]
    fn test_trim_row() {
        let row = vec![Cell::from("a"), Cell::Number(0.0), Cell::Empty, Cell::from("")];
        assert_eq!(trim_row(row), vec![Cell::from("a"), Cell::Number(0.0)]);
    }
}
