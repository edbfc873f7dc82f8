//! Numeric field parsing.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Remove thousands separators.
pub fn strip_separators(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parse a whole, non-negative quantity such as `"1,200"`.
pub fn parse_quantity(s: &str) -> Option<u64> {
    strip_separators(s).parse().ok()
}

/// Parse a price or amount such as `"1,200.50"`.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(&strip_separators(s)).ok()
}
