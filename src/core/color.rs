//! Hex color decoding

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

fn shorthand_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^#?([a-f\d])([a-f\d])([a-f\d])$").expect("Hardcoded regex pattern")
    })
}

fn full_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^#?([a-f\d]{2})([a-f\d]{2})([a-f\d]{2})$")
            .expect("Hardcoded regex pattern")
    })
}

/// Decode `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB`; anything else is `None`
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    // "03F" expands to "0033FF"
    let expanded = shorthand_pattern().replace(hex, "$1$1$2$2$3$3");
    let captures = full_pattern().captures(&expanded)?;
    let channel = |i: usize| u8::from_str_radix(&captures[i], 16).ok();

    Some(Rgb {
        red: channel(1)?,
        green: channel(2)?,
        blue: channel(3)?,
    })
}
