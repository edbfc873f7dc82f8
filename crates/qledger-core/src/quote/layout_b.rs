//! Variant B: eight-line part blocks with shape validation.
//!
//! Default block, relative to the cursor:
//!
//! ```text
//! +0  12            quantity
//! +1  45.10         unit price
//! +2  EA            unit of measure (EA, SET, FT, HR)
//! +3  Hex bolt M8   description
//! +4  541.20        extension
//! +5  001           item sequence number
//! +6  HB-0812 T     part number, revision letter stripped
//! +7  ...           not read
//! ```
//!
//! Offsets and block length come from [`PartsLayout`].

use rust_decimal::Decimal;
use tracing::{debug, trace};

use super::rules::{
    is_item_sequence, is_part_number, locate_parts_date, parse_amount, parse_unit,
    strip_part_suffix,
};
use super::{scan, BlockScanner, ExtractionResult, LayoutParser, ScanStep};
use crate::models::config::PartsLayout;
use crate::models::record::{PartItem, UnitOfMeasure};
use crate::models::{ValidationMode, Variant};

/// Raw field values of one block with the result of each shape check.
struct Candidate<'a> {
    quantity: Option<Decimal>,
    unit_price: Option<Decimal>,
    extension: Option<Decimal>,
    unit: Option<UnitOfMeasure>,
    description: &'a str,
    item_number: &'a str,
    item_number_ok: bool,
    part_number: String,
    part_number_ok: bool,
}

impl Candidate<'_> {
    /// First failing check in validation order, if any.
    fn first_failure(&self) -> Option<&'static str> {
        if self.quantity.is_none() || self.unit_price.is_none() || self.extension.is_none() {
            Some("numeric fields")
        } else if self.unit.is_none() {
            Some("unit of measure")
        } else if !self.item_number_ok {
            Some("item sequence number")
        } else if !self.part_number_ok {
            Some("part number")
        } else {
            None
        }
    }

    /// Relaxed acceptance: a block where every check failed is noise, not a record.
    fn any_passed(&self) -> bool {
        self.quantity.is_some()
            || self.unit_price.is_some()
            || self.extension.is_some()
            || self.unit.is_some()
            || self.item_number_ok
            || self.part_number_ok
    }

    fn into_record(self, quotation_date: &str) -> PartItem {
        PartItem {
            quantity: self.quantity,
            unit_price: self.unit_price,
            unit: self.unit,
            description: self.description.to_string(),
            extension: self.extension,
            item_number: if self.item_number_ok {
                self.item_number.to_string()
            } else {
                String::new()
            },
            part_number: if self.part_number_ok {
                self.part_number
            } else {
                String::new()
            },
            quotation_date: quotation_date.to_string(),
            source_file: String::new(),
        }
    }
}

/// Block scanner for Variant B quotations.
#[derive(Debug, Clone)]
pub struct PartsScanner {
    layout: PartsLayout,
    mode: ValidationMode,
    quotation_date: String,
}

impl PartsScanner {
    pub fn new(layout: PartsLayout, mode: ValidationMode, quotation_date: Option<&str>) -> Self {
        Self {
            layout,
            mode,
            quotation_date: quotation_date.unwrap_or_default().to_string(),
        }
    }

    fn candidate<'a>(&self, block: &'a [String]) -> Candidate<'a> {
        let field = move |offset: usize| block[offset].trim();
        let layout = &self.layout;

        let item_number = field(layout.item_number);
        let part_number = strip_part_suffix(field(layout.part_number));

        Candidate {
            quantity: parse_amount(field(layout.quantity)),
            unit_price: parse_amount(field(layout.unit_price)),
            extension: parse_amount(field(layout.extension)),
            unit: parse_unit(field(layout.unit)),
            description: field(layout.description),
            item_number,
            item_number_ok: is_item_sequence(item_number),
            part_number_ok: is_part_number(&part_number),
            part_number,
        }
    }
}

impl BlockScanner for PartsScanner {
    type Record = PartItem;

    fn window(&self) -> usize {
        self.layout.window()
    }

    fn try_parse_at(&self, lines: &[String], cursor: usize) -> ScanStep<PartItem> {
        let candidate = self.candidate(&lines[cursor..cursor + self.window()]);

        let accepted = match self.mode {
            ValidationMode::Strict => match candidate.first_failure() {
                Some(check) => {
                    trace!("Line {}: rejected on {}", cursor, check);
                    false
                }
                None => true,
            },
            ValidationMode::Relaxed => candidate.any_passed(),
        };

        if !accepted {
            return ScanStep::Skip;
        }

        trace!("Part block at line {}: {}", cursor, candidate.part_number);

        ScanStep::Parsed {
            record: candidate.into_record(&self.quotation_date),
            advance: self.layout.block_len,
        }
    }
}

/// Parser for Variant B quotations.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartsLayoutParser {
    mode: ValidationMode,
    layout: PartsLayout,
}

impl PartsLayoutParser {
    /// Parser with the default block layout.
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            layout: PartsLayout::default(),
        }
    }

    /// Use custom block offsets.
    pub fn with_layout(mut self, layout: PartsLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }
}

impl LayoutParser for PartsLayoutParser {
    type Record = PartItem;

    fn variant(&self) -> Variant {
        Variant::B
    }

    fn parse_lines(&self, lines: &[String]) -> ExtractionResult<PartItem> {
        let quotation_date = locate_parts_date(lines);
        let scanner = PartsScanner::new(self.layout, self.mode, quotation_date.as_deref());
        let records = scan(&scanner, lines);

        debug!("Variant B ({} mode): {} records accepted", self.mode, records.len());
        ExtractionResult::new(records, quotation_date, lines.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::lines;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn block(unit: &str, part: &str) -> Vec<String> {
        lines(&["12", "45.10", unit, "Hex bolt M8", "541.20", "001", part, "Lead time 2 wks"])
    }

    fn parse(mode: ValidationMode, input: &[String]) -> Vec<PartItem> {
        PartsLayoutParser::new(mode).parse_lines(input).records
    }

    #[test]
    fn test_strict_accepts_valid_block() {
        let records = parse(ValidationMode::Strict, &block("EA", "HB-0812 T"));

        assert_eq!(
            records,
            vec![PartItem {
                quantity: Some(dec("12")),
                unit_price: Some(dec("45.10")),
                unit: Some(UnitOfMeasure::Each),
                description: "Hex bolt M8".into(),
                extension: Some(dec("541.20")),
                item_number: "001".into(),
                part_number: "HB-0812".into(),
                quotation_date: String::new(),
                source_file: String::new(),
            }]
        );
    }

    #[test]
    fn test_part_suffix_stripped() {
        let records = parse(ValidationMode::Strict, &block("SET", "ABC-123 T"));
        assert_eq!(records[0].part_number, "ABC-123");
    }

    #[test]
    fn test_strict_rejects_unknown_unit() {
        assert!(parse(ValidationMode::Strict, &block("XX", "ABC-123")).is_empty());
    }

    #[test]
    fn test_relaxed_keeps_block_with_blank_unit() {
        let records = parse(ValidationMode::Relaxed, &block("XX", "ABC-123"));

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].unit, None);
        assert_eq!(records[0].part_number, "ABC-123");
        assert_eq!(records[0].quantity, Some(dec("12")));
    }

    #[test]
    fn test_relaxed_blanks_each_failing_field() {
        let input = lines(&["twelve", "45.10", "EA", "Bolt", "n/a", "1", "ab", "x"]);
        let records = parse(ValidationMode::Relaxed, &input);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.quantity, None);
        assert_eq!(record.unit_price, Some(dec("45.10")));
        assert_eq!(record.extension, None);
        assert_eq!(record.item_number, "");
        assert_eq!(record.part_number, "");
        assert_eq!(record.description, "Bolt");
    }

    #[test]
    fn test_strict_rejects_each_shape() {
        let bad_sequence = lines(&["12", "45.10", "EA", "Bolt", "541.20", "01", "ABC-123", "x"]);
        let bad_part = lines(&["12", "45.10", "EA", "Bolt", "541.20", "001", "abc", "x"]);
        let bad_price = lines(&["12", "45.10 ea", "EA", "Bolt", "541.20", "001", "ABC-123", "x"]);

        assert!(parse(ValidationMode::Strict, &bad_sequence).is_empty());
        assert!(parse(ValidationMode::Strict, &bad_part).is_empty());
        assert!(parse(ValidationMode::Strict, &bad_price).is_empty());
    }

    #[test]
    fn test_strict_skips_one_line_on_failure() {
        let input = block("EA", "ABC-123");
        let scanner = PartsScanner::new(PartsLayout::default(), ValidationMode::Strict, None);

        let mut shifted = lines(&["QUOTATION"]);
        shifted.extend(input);

        assert_eq!(scanner.try_parse_at(&shifted, 0), ScanStep::Skip);
        assert!(matches!(
            scanner.try_parse_at(&shifted, 1),
            ScanStep::Parsed { advance: 8, .. }
        ));
    }

    #[test]
    fn test_consecutive_blocks_and_date() {
        let mut input = lines(&["Quote 3/7/2024", "Page 1"]);
        input.extend(block("EA", "ABC-123"));
        input.extend(lines(&["3", "10.00", "HR", "Labor", "30.00", "002", "SVC-LABOR", ""]));
        input.extend(lines(&["Total", "571.20"]));

        let records = parse(ValidationMode::Strict, &input);
        let parts: Vec<&str> = records.iter().map(|r| r.part_number.as_str()).collect();

        assert_eq!(parts, vec!["ABC-123", "SVC-LABOR"]);
        assert!(records.iter().all(|r| r.quotation_date == "3/7/2024"));
    }

    #[test]
    fn test_last_block_without_trailing_line() {
        // The final block has no eighth line; the read window is only seven.
        let mut input = block("EA", "ABC-123");
        input.pop();

        assert_eq!(parse(ValidationMode::Strict, &input).len(), 1);
    }

    #[test]
    fn test_short_tail_does_not_panic() {
        let input = lines(&["12", "45.10", "EA", "Bolt", "541.20", "001"]);
        assert!(parse(ValidationMode::Strict, &input).is_empty());
        assert!(parse(ValidationMode::Relaxed, &input).is_empty());
    }

    #[test]
    fn test_noise_yields_nothing() {
        let input = lines(&[
            "ACME Parts Co.",
            "Terms: net 30",
            "Thank you for your business",
            "",
            "Ship via ground",
            "F.O.B. origin",
            "Page 1 of 1",
            "Signature",
        ]);

        assert!(parse(ValidationMode::Strict, &input).is_empty());
        assert!(parse(ValidationMode::Relaxed, &input).is_empty());
    }

    #[test]
    fn test_custom_layout() {
        let layout = PartsLayout {
            item_number: 0,
            part_number: 1,
            description: 2,
            quantity: 3,
            unit: 4,
            unit_price: 5,
            extension: 6,
            block_len: 7,
        };
        let input = lines(&["001", "ABC-123", "Bolt", "2", "EA", "1.50", "3.00"]);
        let records = PartsLayoutParser::new(ValidationMode::Strict)
            .with_layout(layout)
            .parse_lines(&input)
            .records;

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].extension, Some(dec("3.00")));
    }
}
