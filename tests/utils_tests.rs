//! Column addressing, color decoding and spreadsheet id extraction

use royalbit_gridmap::core::{
    column_name_to_number, column_number_to_name, get_column_name, get_column_number,
    get_spreadsheet_id, hex_to_rgb, parse_column_name, Rgb,
};
use royalbit_gridmap::error::GridmapError;
use royalbit_gridmap::types::{LocatorKind, ResourceLocator};

// ═══════════════════════════════════════════════════════════════════════════
// COLUMN ADDRESSING
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_column_fixed_points() {
    assert_eq!(get_column_name(1), "A");
    assert_eq!(get_column_name(26), "Z");
    assert_eq!(get_column_name(27), "AA");
    assert_eq!(get_column_name(52), "AZ");
    assert_eq!(get_column_name(53), "BA");
    assert_eq!(get_column_number("ZZ"), 702);
    assert_eq!(get_column_number("AAA"), 703);
}

#[test]
fn test_number_name_number_round_trip() {
    for n in 1..=100_000 {
        assert_eq!(column_name_to_number(&column_number_to_name(n)), n);
    }
}

#[test]
fn test_name_number_name_round_trip() {
    let letters: Vec<char> = ('A'..='Z').collect();
    for a in &letters {
        assert_eq!(column_number_to_name(column_name_to_number(&a.to_string())), a.to_string());
        for b in &letters {
            let name = format!("{}{}", a, b);
            assert_eq!(column_number_to_name(column_name_to_number(&name)), name);
        }
    }
}

#[test]
fn test_overlong_column_name_rejected() {
    assert_eq!(parse_column_name("AAAAAAAAAAAAAAAAAAAA"), None);
    assert_eq!(parse_column_name("XFD"), Some(16384));
}

// ═══════════════════════════════════════════════════════════════════════════
// COLORS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_hex_colors() {
    let red = Some(Rgb {
        red: 255,
        green: 0,
        blue: 0,
    });
    assert_eq!(hex_to_rgb("#FF0000"), red);
    assert_eq!(hex_to_rgb("F00"), red);
    assert_eq!(hex_to_rgb("#f00"), red);
    assert_eq!(hex_to_rgb("notacolor"), None);
    assert_eq!(hex_to_rgb("#GG0000"), None);
}

// ═══════════════════════════════════════════════════════════════════════════
// SPREADSHEET IDS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_id_from_url() {
    let id = "1aB_cD-eFgHiJkLmNoPqRsTuVwXyZ0123";
    let locator = ResourceLocator {
        kind: LocatorKind::ByUrl,
        value: format!("https://docs.google.com/spreadsheets/d/{}/edit", id),
    };
    assert_eq!(get_spreadsheet_id(&locator).unwrap(), id);
}

#[test]
fn test_empty_url_fails() {
    let locator = ResourceLocator {
        kind: LocatorKind::ByUrl,
        value: String::new(),
    };
    let err = get_spreadsheet_id(&locator).unwrap_err();
    assert!(matches!(err, GridmapError::InvalidResourceReference(_)));
    assert!(err.to_string().contains("By URL"));
}

#[test]
fn test_locator_deserializes_from_json() {
    let locator: ResourceLocator =
        serde_json::from_str(r#"{"type": "byList", "value": "sheet-123"}"#).unwrap();
    assert_eq!(locator.kind, LocatorKind::ByList);
    assert_eq!(get_spreadsheet_id(&locator).unwrap(), "sheet-123");
}
