//! Spreadsheet column addressing (bijective base-26)
//!
//! Column ordinals are 1-based: 1 → A, 26 → Z, 27 → AA.

/// Convert a 1-based column ordinal to its letter name (1 → A, 27 → AA)
///
/// Returns an empty string for 0, which has no column name.
pub fn column_number_to_name(n: usize) -> String {
    let mut result = String::new();
    let mut num = n;

    while num > 0 {
        num -= 1;
        result.insert(0, (b'A' + (num % 26) as u8) as char);
        num /= 26;
    }

    result
}

/// Convert an uppercase column name to its 1-based ordinal (A → 1, AA → 27)
///
/// Case is not normalized; callers pass uppercase names.
pub fn column_name_to_number(name: &str) -> usize {
    name.bytes()
        .fold(0, |acc, b| acc * 26 + b.saturating_sub(b'A') as usize + 1)
}

/// Checked variant of [`column_name_to_number`] for untrusted input
///
/// Accepts either case. Returns `None` for empty or non-letter input, and for
/// names whose ordinal does not fit in `usize`.
pub fn parse_column_name(name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }
    name.bytes().try_fold(0usize, |acc, b| {
        if !b.is_ascii_alphabetic() {
            return None;
        }
        let digit = (b.to_ascii_uppercase() - b'A') as usize + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_number_to_name() {
        // Single letters
        assert_eq!(column_number_to_name(1), "A");
        assert_eq!(column_number_to_name(2), "B");
        assert_eq!(column_number_to_name(26), "Z");

        // Double letters
        assert_eq!(column_number_to_name(27), "AA");
        assert_eq!(column_number_to_name(52), "AZ");
        assert_eq!(column_number_to_name(53), "BA");
        assert_eq!(column_number_to_name(702), "ZZ");

        // Triple letters
        assert_eq!(column_number_to_name(703), "AAA");
        assert_eq!(column_number_to_name(16384), "XFD");
    }

    #[test]
    fn test_column_number_zero_has_no_name() {
        assert_eq!(column_number_to_name(0), "");
    }

    #[test]
    fn test_column_name_to_number() {
        assert_eq!(column_name_to_number("A"), 1);
        assert_eq!(column_name_to_number("Z"), 26);
        assert_eq!(column_name_to_number("AA"), 27);
        assert_eq!(column_name_to_number("BA"), 53);
        assert_eq!(column_name_to_number("XFD"), 16384);
    }

    #[test]
    fn test_round_trip() {
        for n in 1..=20_000 {
            assert_eq!(column_name_to_number(&column_number_to_name(n)), n);
        }
    }

    #[test]
    fn test_parse_column_name() {
        assert_eq!(parse_column_name("ab"), Some(28));
        assert_eq!(parse_column_name("C"), Some(3));
        assert_eq!(parse_column_name(""), None);
        assert_eq!(parse_column_name("A1"), None);
    }

    #[test]
    fn test_parse_column_name_overflow() {
        assert_eq!(parse_column_name("AAAAAAAAAAAAAAAAAAAA"), None);
        assert_eq!(parse_column_name("zzzzzzzzzzzzzzzzzzzz"), None);
        // Longest all-Z name that still fits
        assert!(parse_column_name("ZZZZZZZZZZZZ").is_some());
    }
}
