//! Regex patterns for quotation field shapes.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Variant A header date, e.g. "Date:  2024-03-01"
    pub static ref QUOTE_DATE: Regex = Regex::new(
        r"Date:\s+(\d{4}-\d{2}-\d{2})"
    ).unwrap();

    // Variant B date anywhere on a line, e.g. "3/7/2024"
    pub static ref PARTS_DATE: Regex = Regex::new(
        r"\b(\d{1,2}/\d{1,2}/\d{4})\b"
    ).unwrap();

    // Three-digit line sequence number
    pub static ref ITEM_SEQUENCE: Regex = Regex::new(
        r"^\d{3}$"
    ).unwrap();

    // Uppercase alphanumeric part number with hyphens, at least four characters
    pub static ref PART_NUMBER: Regex = Regex::new(
        r"^[A-Z0-9][A-Z0-9-]{3,}$"
    ).unwrap();

    // Single-letter revision suffix after a part number, e.g. "ABC-123 T"
    pub static ref PART_SUFFIX: Regex = Regex::new(
        r"\s+[A-Z]$"
    ).unwrap();
}
