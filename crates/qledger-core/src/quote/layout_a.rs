//! Variant A: six-line item blocks.
//!
//! ```text
//! X1            item number
//! Valve 2"      description
//! Hardware      category
//! 10            quantity
//! 1,200.50      net price
//! 12,005.00     amount
//! ```

use tracing::trace;

use super::rules::{locate_quote_date, parse_amount, parse_quantity};
use super::{scan, BlockScanner, ExtractionResult, LayoutParser, ScanStep};
use crate::models::record::QuoteItem;
use crate::models::Variant;

const BLOCK_LEN: usize = 6;

/// Block scanner for Variant A quotations.
#[derive(Debug, Clone, Default)]
pub struct QuoteScanner {
    quotation_date: String,
}

impl QuoteScanner {
    /// Scanner stamping every record with the document's date.
    pub fn new(quotation_date: Option<&str>) -> Self {
        Self {
            quotation_date: quotation_date.unwrap_or_default().to_string(),
        }
    }
}

impl BlockScanner for QuoteScanner {
    type Record = QuoteItem;

    fn window(&self) -> usize {
        BLOCK_LEN
    }

    fn try_parse_at(&self, lines: &[String], cursor: usize) -> ScanStep<QuoteItem> {
        let block: Vec<&str> = lines[cursor..cursor + BLOCK_LEN]
            .iter()
            .map(|l| l.trim())
            .collect();

        let (Some(quantity), Some(net_price), Some(amount)) = (
            parse_quantity(block[3]),
            parse_amount(block[4]),
            parse_amount(block[5]),
        ) else {
            return ScanStep::Skip;
        };

        trace!("Item block at line {}: {}", cursor, block[0]);

        ScanStep::Parsed {
            record: QuoteItem {
                item_number: block[0].to_string(),
                description: block[1].to_string(),
                category: block[2].to_string(),
                quantity,
                net_price,
                amount,
                quotation_date: self.quotation_date.clone(),
                source_file: String::new(),
            },
            advance: BLOCK_LEN,
        }
    }
}

/// Parser for Variant A quotations.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteLayoutParser;

impl QuoteLayoutParser {
    pub fn new() -> Self {
        Self
    }
}

impl LayoutParser for QuoteLayoutParser {
    type Record = QuoteItem;

    fn variant(&self) -> Variant {
        Variant::A
    }

    fn parse_lines(&self, lines: &[String]) -> ExtractionResult<QuoteItem> {
        let quotation_date = locate_quote_date(lines);
        let scanner = QuoteScanner::new(quotation_date.as_deref());
        let records = scan(&scanner, lines);
        ExtractionResult::new(records, quotation_date, lines.len())
    }
}
