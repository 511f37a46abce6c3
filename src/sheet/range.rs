//! A1-style range addressing (`Sheet1!A1:C10`)

use crate::core::column::{column_number_to_name, parse_column_name};
use crate::error::{GridmapError, GridmapResult};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// A sheet name plus optional 1-based inclusive bounds; `None` is unbounded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Range {
    pub sheet: String,
    pub start_col: Option<usize>,
    pub start_row: Option<usize>,
    pub end_col: Option<usize>,
    pub end_row: Option<usize>,
}

fn bounds_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([A-Z]*)(\d*)(?::([A-Z]*)(\d*))?$").expect("Hardcoded regex pattern")
    })
}

impl A1Range {
    /// Whole-sheet range
    pub fn sheet(name: impl Into<String>) -> Self {
        Self {
            sheet: name.into(),
            start_col: None,
            start_row: None,
            end_col: None,
            end_row: None,
        }
    }

    /// Parse `Sheet`, `Sheet!A1`, `Sheet!A1:C10`, `Sheet!A:C`, `Sheet!1:1` or `'My Sheet'!B2`
    pub fn parse(value: &str) -> GridmapResult<Self> {
        let invalid = || GridmapError::InvalidRange(value.to_string());
        let (sheet, bounds) = split_sheet(value).ok_or_else(invalid)?;
        if sheet.is_empty() {
            return Err(invalid());
        }

        let Some(bounds) = bounds else {
            return Ok(Self::sheet(sheet));
        };

        let upper = bounds.to_ascii_uppercase();
        let captures = bounds_pattern().captures(&upper).ok_or_else(invalid)?;
        let part = |i: usize| captures.get(i).map(|m| m.as_str()).unwrap_or("");

        let col = |s: &str| -> GridmapResult<Option<usize>> {
            if s.is_empty() {
                Ok(None)
            } else {
                parse_column_name(s).map(Some).ok_or_else(invalid)
            }
        };
        let row = |s: &str| -> GridmapResult<Option<usize>> {
            if s.is_empty() {
                return Ok(None);
            }
            match s.parse::<usize>() {
                Ok(0) | Err(_) => Err(invalid()),
                Ok(n) => Ok(Some(n)),
            }
        };

        let start_col = col(part(1))?;
        let start_row = row(part(2))?;
        if start_col.is_none() && start_row.is_none() {
            return Err(invalid());
        }

        let (end_col, end_row) = if captures.get(3).is_some() {
            let end_col = col(part(3))?;
            let end_row = row(part(4))?;
            if end_col.is_none() && end_row.is_none() {
                return Err(invalid());
            }
            (end_col, end_row)
        } else {
            (start_col, start_row)
        };

        Ok(Self {
            sheet,
            start_col,
            start_row,
            end_col,
            end_row,
        })
    }

    /// 0-based inclusive-exclusive row span, clamped to `len`
    pub fn row_span(&self, len: usize) -> std::ops::Range<usize> {
        span(self.start_row, self.end_row, len)
    }

    /// 0-based inclusive-exclusive column span, clamped to `len`
    pub fn col_span(&self, len: usize) -> std::ops::Range<usize> {
        span(self.start_col, self.end_col, len)
    }
}

fn span(start: Option<usize>, end: Option<usize>, len: usize) -> std::ops::Range<usize> {
    let lower = start.map(|s| s - 1).unwrap_or(0).min(len);
    let upper = end.unwrap_or(len).min(len).max(lower);
    lower..upper
}

/// Split `Sheet!bounds`, honouring quoted names with `''` escapes
fn split_sheet(value: &str) -> Option<(String, Option<&str>)> {
    if let Some(rest) = value.strip_prefix('\'') {
        let mut name = String::new();
        let mut chars = rest.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c != '\'' {
                name.push(c);
                continue;
            }
            if let Some((_, '\'')) = chars.peek() {
                name.push('\'');
                chars.next();
                continue;
            }
            let tail = &rest[i + 1..];
            return match tail {
                "" => Some((name, None)),
                _ => tail.strip_prefix('!').map(|b| (name, Some(b))),
            };
        }
        return None;
    }

    match value.split_once('!') {
        Some((sheet, bounds)) => Some((sheet.to_string(), Some(bounds))),
        None => Some((value.to_string(), None)),
    }
}

impl fmt::Display for A1Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.sheet.chars().all(|c| c.is_alphanumeric() || c == '_') {
            write!(f, "{}", self.sheet)?;
        } else {
            write!(f, "'{}'", self.sheet.replace('\'', "''"))?;
        }

        if self.start_col.is_none() && self.start_row.is_none() {
            return Ok(());
        }

        let bound = |col: Option<usize>, row: Option<usize>| {
            format!(
                "{}{}",
                col.map(column_number_to_name).unwrap_or_default(),
                row.map(|r| r.to_string()).unwrap_or_default()
            )
        };
        write!(
            f,
            "!{}:{}",
            bound(self.start_col, self.start_row),
            bound(self.end_col, self.end_row)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sheet_only() {
        let range = A1Range::parse("Sheet1").unwrap();
        assert_eq!(range, A1Range::sheet("Sheet1"));
    }

    #[test]
    fn test_parse_cell_range() {
        let range = A1Range::parse("Data!b2:d10").unwrap();
        assert_eq!(range.sheet, "Data");
        assert_eq!(range.start_col, Some(2));
        assert_eq!(range.start_row, Some(2));
        assert_eq!(range.end_col, Some(4));
        assert_eq!(range.end_row, Some(10));
    }

    #[test]
    fn test_parse_row_range() {
        let range = A1Range::parse("Sheet1!1:1").unwrap();
        assert_eq!(range.start_col, None);
        assert_eq!(range.start_row, Some(1));
        assert_eq!(range.end_row, Some(1));
        assert_eq!(range.row_span(5), 0..1);
        assert_eq!(range.col_span(3), 0..3);
    }

    #[test]
    fn test_parse_single_cell_and_columns() {
        let cell = A1Range::parse("Sheet1!C3").unwrap();
        assert_eq!(cell.end_col, Some(3));
        assert_eq!(cell.end_row, Some(3));

        let cols = A1Range::parse("Sheet1!A:B").unwrap();
        assert_eq!(cols.start_row, None);
        assert_eq!(cols.col_span(10), 0..2);
    }

    #[test]
    fn test_parse_quoted_sheet() {
        let range = A1Range::parse("'Q1 ''24'!A1:B2").unwrap();
        assert_eq!(range.sheet, "Q1 '24");
        assert_eq!(range.to_string(), "'Q1 ''24'!A1:B2");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(A1Range::parse("Sheet1!").is_err());
        assert!(A1Range::parse("Sheet1!A0").is_err());
        assert!(A1Range::parse("Sheet1!1A").is_err());
        assert!(A1Range::parse("!A1").is_err());
        assert!(A1Range::parse("'Open!A1").is_err());
    }

    #[test]
    fn test_spans_clamp_to_data() {
        let range = A1Range::parse("Sheet1!B5:D20").unwrap();
        assert_eq!(range.row_span(3), 3..3);
        assert_eq!(range.col_span(3), 1..3);
    }
}
