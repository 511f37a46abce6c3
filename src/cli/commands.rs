use crate::core::{
    append_records, column_number_to_name, extract_resource_id, get_existing_sheet_names,
    get_range_string, hex_to_rgb, map_fields, parse_column_name, prepare_sheet_data,
};
use crate::error::{GridmapError, GridmapResult};
use crate::sheet::{MemoryWorkbook, SheetIo, Workbook};
use crate::types::{
    ExtraDataPolicy, FieldValue, LocatorKind, RangeDefinition, Record, ValueInputOption,
    ValueRenderOption, WriteOptions,
};
use colored::Colorize;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Records to write: plain objects, or per-item field lists
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InputItems {
    Records(Vec<Record>),
    Fields(Vec<Vec<FieldValue>>),
}

impl InputItems {
    pub fn into_records(self) -> Vec<Record> {
        match self {
            InputItems::Records(records) => records,
            InputItems::Fields(fields) => map_fields(&fields, fields.len()),
        }
    }

    /// Parse a `.json` or `.yaml` input file
    pub fn load(path: &Path) -> GridmapResult<Self> {
        let content = fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
        if is_yaml {
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(serde_json::from_str(&content)?)
        }
    }
}

/// Execute the read command
pub async fn read(
    file: PathBuf,
    sheet_name: String,
    definition: RangeDefinition,
    add_row_numbers: bool,
    json: bool,
) -> GridmapResult<()> {
    let sheet = MemoryWorkbook::new(Workbook::load(&file)?);
    let range = get_range_string(&sheet_name, &definition);
    let grid = sheet
        .get_data(&range, ValueRenderOption::UnformattedValue)
        .await?;
    let shaped = prepare_sheet_data(grid, &definition, add_row_numbers);

    if json {
        println!("{}", serde_json::to_string_pretty(&shaped.into_records())?);
        return Ok(());
    }

    println!("{}", "📖 Gridmap - Reading range".bold().green());
    println!("   File:  {}", file.display());
    println!("   Range: {}", range.bright_yellow());
    println!(
        "   Header row: {}, first data row: {}",
        shaped.header_row + 1,
        shaped.first_data_row + 1
    );
    println!();

    let columns = shaped.column_names();
    println!("   {}", columns.join(" | ").bold().cyan());
    for row in shaped.data.iter().skip(shaped.first_data_row) {
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        println!("   {}", cells.join(" | "));
    }
    println!();
    println!(
        "{}",
        format!(
            "✅ {} data rows",
            shaped.data.len().saturating_sub(shaped.first_data_row)
        )
        .bold()
        .green()
    );

    Ok(())
}

/// Execute the append command
pub async fn append(
    file: PathBuf,
    sheet_name: String,
    input: PathBuf,
    policy: ExtraDataPolicy,
    user_entered: bool,
    dry_run: bool,
) -> GridmapResult<()> {
    println!("{}", "📝 Gridmap - Appending records".bold().green());
    println!("   File:  {}", file.display());
    println!("   Sheet: {}", sheet_name.bright_yellow());
    println!();

    if dry_run {
        println!(
            "{}",
            "📋 DRY RUN MODE - No changes will be written\n".yellow()
        );
    }

    let items = InputItems::load(&input)?.into_records();

    let mut book = Workbook::load(&file)?;
    if book.sheet(&sheet_name).is_none() {
        println!("   Creating sheet {}", sheet_name.bright_yellow());
        book.sheet_or_insert(&sheet_name);
    }

    let options = WriteOptions {
        cell_format: if user_entered {
            ValueInputOption::UserEntered
        } else {
            ValueInputOption::Raw
        },
    };

    let sheet = MemoryWorkbook::new(book);
    let outcome = append_records(policy, &sheet_name, &sheet, items, &options).await?;

    println!("   Columns: {}", outcome.columns.join(", ").cyan());
    println!("   Rows appended: {}", outcome.rows.len());

    if dry_run {
        println!();
        println!("{}", "✅ Dry run complete".bold().green());
        return Ok(());
    }

    sheet.into_inner().save(&file)?;
    println!();
    println!("{}", "✅ Workbook updated".bold().green());
    Ok(())
}

/// Execute the sheets command
pub async fn sheets(file: PathBuf) -> GridmapResult<()> {
    let sheet = MemoryWorkbook::new(Workbook::load(&file)?);
    for name in get_existing_sheet_names(&sheet).await? {
        println!("{}", name);
    }
    Ok(())
}

/// Execute the column command: letters → ordinal, ordinal → letters
pub fn column(value: String) -> GridmapResult<()> {
    let converted = if value.chars().all(|c| c.is_ascii_digit()) {
        match value.parse::<usize>() {
            Ok(n) if n > 0 => column_number_to_name(n),
            _ => return Err(GridmapError::InvalidRange(value)),
        }
    } else {
        parse_column_name(&value)
            .ok_or(GridmapError::InvalidRange(value.clone()))?
            .to_string()
    };
    println!("{}", converted);
    Ok(())
}

/// Execute the color command
pub fn color(hex: String) -> GridmapResult<()> {
    match hex_to_rgb(&hex) {
        Some(rgb) => println!("red={} green={} blue={}", rgb.red, rgb.green, rgb.blue),
        None => println!("{}", format!("⚠️  '{}' is not a hex color", hex).yellow()),
    }
    Ok(())
}

/// Execute the sheet-id command
pub fn sheet_id(kind: LocatorKind, value: String) -> GridmapResult<()> {
    let id = extract_resource_id(kind, &value)?;
    if id.is_empty() {
        println!("{}", "⚠️  No spreadsheet id found".yellow());
    } else {
        println!("{}", id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_input_items_records() {
        let items: InputItems = serde_json::from_str(r#"[{"a": 1}, {"b": 2}]"#).unwrap();
        let records = items.into_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["b"], 2);
    }

    #[test]
    fn test_input_items_fields() {
        let items: InputItems = serde_json::from_str(
            r#"[[{"fieldId": "a", "fieldValue": 1}, {"fieldId": "a", "fieldValue": 3}]]"#,
        )
        .unwrap();
        let records = items.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["a"], 3);
    }

    #[test]
    fn test_input_items_from_yaml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.yaml");
        fs::write(&path, "- name: Ada\n  age: 36\n").unwrap();
        let records = InputItems::load(&path).unwrap().into_records();
        assert_eq!(records[0]["name"], "Ada");
    }

    #[test]
    fn test_column_conversions() {
        assert!(column("27".to_string()).is_ok());
        assert!(column("aa".to_string()).is_ok());
        assert!(column("0".to_string()).is_err());
        assert!(column("A1".to_string()).is_err());
    }

    #[test]
    fn test_sheet_id_empty_value() {
        assert!(sheet_id(LocatorKind::ById, String::new()).is_err());
    }
}
