//! Spreadsheet identifier extraction from user-supplied references

use crate::error::{GridmapError, GridmapResult};
use crate::types::{LocatorKind, ResourceLocator};
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

/// Spreadsheet ids are runs of 25+ word characters or hyphens
fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[-A-Za-z0-9_]{25,}").expect("Hardcoded regex pattern"))
}

/// Extract the spreadsheet id from a raw id, list selection or URL
///
/// An empty value is an error. A URL without a recognizable id yields an
/// empty string; callers treat that as "not found".
pub fn extract_resource_id(kind: LocatorKind, value: &str) -> GridmapResult<String> {
    if value.is_empty() {
        return Err(GridmapError::InvalidResourceReference(format!(
            "Can not get sheet '{}' with a value of '{}'",
            kind.display_name(),
            value
        )));
    }

    match kind {
        LocatorKind::ByUrl => match id_pattern().find(value) {
            Some(m) => Ok(m.as_str().to_string()),
            None => {
                warn!(url = value, "no spreadsheet id found in URL");
                Ok(String::new())
            }
        },
        LocatorKind::ById | LocatorKind::ByList => Ok(value.to_string()),
    }
}

/// Resolve a [`ResourceLocator`] to its spreadsheet id
pub fn get_spreadsheet_id(locator: &ResourceLocator) -> GridmapResult<String> {
    extract_resource_id(locator.kind, &locator.value)
}
