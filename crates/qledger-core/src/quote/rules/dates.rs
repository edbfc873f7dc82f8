//! Quotation date lookup.

use regex::Regex;

use super::patterns::{PARTS_DATE, QUOTE_DATE};

/// Find the first date matching `pattern`, scanning lines in order.
///
/// Returns the first capture group when the pattern has one, otherwise the
/// whole match. `None` means the document carries no date, which is normal.
pub fn locate_date<S: AsRef<str>>(lines: &[S], pattern: &Regex) -> Option<String> {
    lines.iter().find_map(|line| {
        let caps = pattern.captures(line.as_ref())?;
        caps.get(1)
            .or_else(|| caps.get(0))
            .map(|m| m.as_str().to_string())
    })
}

/// Variant A date (`Date: YYYY-MM-DD`).
pub fn locate_quote_date<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    locate_date(lines, &QUOTE_DATE)
}

/// Variant B date (`M/D/YYYY`).
pub fn locate_parts_date<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    locate_date(lines, &PARTS_DATE)
}
