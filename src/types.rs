use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key and header label of the synthetic row-number column
pub const ROW_NUMBER: &str = "row_number";

//==============================================================================
// Grid Model
//==============================================================================

/// A single cell value as fetched from a sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    /// Absent or null cell
    #[default]
    Empty,
}

impl Cell {
    /// Only `Empty` and `Text("")` are blank; a numeric 0 is data
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            Cell::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Convert to a JSON value for record output
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Cell::Empty => serde_json::Value::Null,
            Cell::Text(s) => serde_json::Value::String(s.clone()),
            Cell::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        }
    }

    /// Convert a record value into a cell for the positional writer
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Cell::Empty,
            serde_json::Value::String(s) => Cell::Text(s.clone()),
            serde_json::Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Empty),
            serde_json::Value::Bool(true) => Cell::Text("TRUE".to_string()),
            serde_json::Value::Bool(false) => Cell::Text("FALSE".to_string()),
            other => Cell::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Cell::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Number(value as f64)
    }
}

/// One sheet row; trailing empty cells are omitted rather than padded
pub type Row = Vec<Cell>;

/// Row-major cell grid; rows may differ in length
pub type Grid = Vec<Row>;

/// Application record keyed by column name, in insertion order
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Result of range detection: shaped grid plus 0-based header/data row indices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapedRange {
    pub data: Grid,
    pub header_row: usize,
    pub first_data_row: usize,
}

//==============================================================================
// Range Detection Options
//==============================================================================

/// Where automatic detection stops reading rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ReadRowsUntil {
    FirstEmptyRow,
    #[default]
    Bottom,
}

/// How the table boundaries of a range are determined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "rangeDefinition",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum RangeDefinition {
    /// Heuristic trimming of leading rows/columns (and optionally trailing rows)
    DetectAutomatically {
        #[serde(default)]
        read_rows_until: ReadRowsUntil,
    },
    /// Explicit boundaries; row numbers are 1-based as entered by the user
    SpecifyRange {
        #[serde(default)]
        range: Option<String>,
        #[serde(deserialize_with = "deserialize_row_number")]
        header_row: usize,
        #[serde(deserialize_with = "deserialize_row_number")]
        first_data_row: usize,
    },
}

impl Default for RangeDefinition {
    fn default() -> Self {
        RangeDefinition::DetectAutomatically {
            read_rows_until: ReadRowsUntil::Bottom,
        }
    }
}

/// Row numbers arrive either as numbers or numeric strings ("2")
fn deserialize_row_number<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RowNumber {
        Number(usize),
        Text(String),
    }

    match RowNumber::deserialize(deserializer)? {
        RowNumber::Number(n) => Ok(n),
        RowNumber::Text(s) => s
            .trim()
            .parse::<usize>()
            .map_err(|_| serde::de::Error::custom(format!("invalid row number '{}'", s))),
    }
}

//==============================================================================
// Write Options
//==============================================================================

/// How fields missing from the sheet header are handled on write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ExtraDataPolicy {
    #[default]
    InsertInNewColumn,
    IgnoreIt,
    Error,
}

impl FromStr for ExtraDataPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insertInNewColumn" | "insert" => Ok(ExtraDataPolicy::InsertInNewColumn),
            "ignoreIt" | "ignore" => Ok(ExtraDataPolicy::IgnoreIt),
            "error" => Ok(ExtraDataPolicy::Error),
            other => Err(format!(
                "unknown extra data policy '{}' (expected insertInNewColumn, ignoreIt or error)",
                other
            )),
        }
    }
}

/// How values are rendered when reading a range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueRenderOption {
    #[default]
    FormattedValue,
    UnformattedValue,
    Formula,
}

/// How written values are interpreted by the sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    #[default]
    Raw,
    UserEntered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WriteOptions {
    #[serde(default)]
    pub cell_format: ValueInputOption,
}

/// One user-declared field of an input item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValue {
    pub field_id: String,
    #[serde(default)]
    pub field_value: serde_json::Value,
}

impl FieldValue {
    pub fn new(field_id: impl Into<String>, field_value: impl Into<serde_json::Value>) -> Self {
        Self {
            field_id: field_id.into(),
            field_value: field_value.into(),
        }
    }
}

//==============================================================================
// Resource Locators
//==============================================================================

/// How the user referenced a spreadsheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LocatorKind {
    ById,
    ByList,
    ByUrl,
}

impl LocatorKind {
    /// Label shown to users for this locator mode
    pub fn display_name(&self) -> &'static str {
        match self {
            LocatorKind::ById => "By ID",
            LocatorKind::ByList => "From List",
            LocatorKind::ByUrl => "By URL",
        }
    }
}

impl FromStr for LocatorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "byId" | "by-id" | "id" => Ok(LocatorKind::ById),
            "byList" | "by-list" | "list" => Ok(LocatorKind::ByList),
            "byUrl" | "by-url" | "url" => Ok(LocatorKind::ByUrl),
            other => Err(format!(
                "unknown locator '{}' (expected byId, byList or byUrl)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLocator {
    #[serde(rename = "type")]
    pub kind: LocatorKind,
    #[serde(default)]
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_blankness() {
        assert!(Cell::Empty.is_blank());
        assert!(Cell::Text(String::new()).is_blank());
        assert!(!Cell::Text(" ".to_string()).is_blank());
        assert!(!Cell::Number(0.0).is_blank());
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Number(3.0).to_string(), "3");
        assert_eq!(Cell::Number(2.5).to_string(), "2.5");
        assert_eq!(Cell::from("abc").to_string(), "abc");
        assert_eq!(Cell::Empty.to_string(), "");
    }

    #[test]
    fn test_cell_deserialize_untagged() {
        let row: Row = serde_json::from_str(r#"[1, "a", null, 2.5]"#).unwrap();
        assert_eq!(
            row,
            vec![
                Cell::Number(1.0),
                Cell::from("a"),
                Cell::Empty,
                Cell::Number(2.5)
            ]
        );
    }

    #[test]
    fn test_cell_from_json_value() {
        assert_eq!(Cell::from_json(&serde_json::json!(true)), Cell::from("TRUE"));
        assert_eq!(Cell::from_json(&serde_json::json!(null)), Cell::Empty);
        assert_eq!(Cell::from_json(&serde_json::json!(7)), Cell::Number(7.0));
        assert_eq!(
            Cell::from_json(&serde_json::json!({"a": 1})),
            Cell::from(r#"{"a":1}"#)
        );
    }

    #[test]
    fn test_range_definition_specify_from_strings() {
        let def: RangeDefinition = serde_json::from_str(
            r#"{"rangeDefinition": "specifyRange", "headerRow": "2", "firstDataRow": 3, "range": "A1:C9"}"#,
        )
        .unwrap();
        assert_eq!(
            def,
            RangeDefinition::SpecifyRange {
                range: Some("A1:C9".to_string()),
                header_row: 2,
                first_data_row: 3,
            }
        );
    }

    #[test]
    fn test_range_definition_detect_defaults() {
        let def: RangeDefinition =
            serde_json::from_str(r#"{"rangeDefinition": "detectAutomatically"}"#).unwrap();
        assert_eq!(def, RangeDefinition::default());

        let def: RangeDefinition = serde_yaml::from_str(
            "rangeDefinition: detectAutomatically\nreadRowsUntil: firstEmptyRow\n",
        )
        .unwrap();
        assert_eq!(
            def,
            RangeDefinition::DetectAutomatically {
                read_rows_until: ReadRowsUntil::FirstEmptyRow
            }
        );
    }

    #[test]
    fn test_range_definition_rejects_bad_row_number() {
        let result: Result<RangeDefinition, _> = serde_json::from_str(
            r#"{"rangeDefinition": "specifyRange", "headerRow": "two", "firstDataRow": 3}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_policy_and_locator_parsing() {
        assert_eq!(
            "insertInNewColumn".parse::<ExtraDataPolicy>().unwrap(),
            ExtraDataPolicy::InsertInNewColumn
        );
        assert_eq!("ignoreIt".parse::<ExtraDataPolicy>().unwrap(), ExtraDataPolicy::IgnoreIt);
        assert!("drop".parse::<ExtraDataPolicy>().is_err());
        assert_eq!("byUrl".parse::<LocatorKind>().unwrap(), LocatorKind::ByUrl);
        assert_eq!(LocatorKind::ByList.display_name(), "From List");
    }

    #[test]
    fn test_value_option_wire_names() {
        assert_eq!(
            serde_json::to_string(&ValueInputOption::UserEntered).unwrap(),
            "\"USER_ENTERED\""
        );
        assert_eq!(
            serde_json::to_string(&ValueRenderOption::FormattedValue).unwrap(),
            "\"FORMATTED_VALUE\""
        );
    }
}
