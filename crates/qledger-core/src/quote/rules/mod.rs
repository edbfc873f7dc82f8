//! Field rules shared by the layout scanners.
//!
//! Every check is a small named predicate or parser so the scanners read as a
//! list of rules and each rule can be tested on its own.

pub mod dates;
pub mod numbers;
pub mod patterns;
pub mod shapes;

pub use dates::{locate_date, locate_parts_date, locate_quote_date};
pub use numbers::{parse_amount, parse_quantity, strip_separators};
pub use shapes::{is_item_sequence, is_part_number, parse_unit, strip_part_suffix};
