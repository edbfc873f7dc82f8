//! Shape checks for Variant B identifiers and unit codes.

use crate::models::record::UnitOfMeasure;

use super::patterns::{ITEM_SEQUENCE, PART_NUMBER, PART_SUFFIX};

/// Parse one of the enumerated unit-of-measure codes.
pub fn parse_unit(s: &str) -> Option<UnitOfMeasure> {
    s.trim().parse().ok()
}

/// Exactly three digits, e.g. `"010"`.
pub fn is_item_sequence(s: &str) -> bool {
    ITEM_SEQUENCE.is_match(s.trim())
}

/// Drop a trailing single-letter suffix: `"ABC-123 T"` becomes `"ABC-123"`.
pub fn strip_part_suffix(s: &str) -> String {
    PART_SUFFIX.replace(s.trim(), "").into_owned()
}

/// Uppercase alphanumeric part number with hyphens, at least four characters.
pub fn is_part_number(s: &str) -> bool {
    PART_NUMBER.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit() {
        assert_eq!(parse_unit("EA"), Some(UnitOfMeasure::Each));
        assert_eq!(parse_unit(" FT "), Some(UnitOfMeasure::Foot));
        assert_eq!(parse_unit("XX"), None);
        assert_eq!(parse_unit(""), None);
    }

    #[test]
    fn test_item_sequence() {
        assert!(is_item_sequence("001"));
        assert!(is_item_sequence(" 120 "));
        assert!(!is_item_sequence("01"));
        assert!(!is_item_sequence("1000"));
        assert!(!is_item_sequence("0A1"));
    }

    #[test]
    fn test_strip_part_suffix() {
        assert_eq!(strip_part_suffix("ABC-123 T"), "ABC-123");
        assert_eq!(strip_part_suffix("ABC-123"), "ABC-123");
        assert_eq!(strip_part_suffix("ABC-123T"), "ABC-123T");
        assert_eq!(strip_part_suffix("ABC-123 t"), "ABC-123 t");
    }

    #[test]
    fn test_part_number() {
        assert!(is_part_number("ABC-123"));
        assert!(is_part_number("7781"));
        assert!(!is_part_number("AB1"));
        assert!(!is_part_number("abc-123"));
        assert!(!is_part_number("-ABC"));
        assert!(!is_part_number("ABC 123"));
    }
}
