//! Quotation line-item extraction.
//!
//! Each vendor layout is a [`BlockScanner`]: given a cursor into the line
//! sequence it either recognises one record and says how many lines it used,
//! or skips. [`scan`] drives the cursor; [`LayoutParser`] wraps a scanner with
//! date lookup and empty-result reporting.

mod layout_a;
mod layout_b;
pub mod rules;

pub use layout_a::{QuoteLayoutParser, QuoteScanner};
pub use layout_b::{PartsLayoutParser, PartsScanner};

use tracing::{debug, warn};

use crate::error::DocumentError;
use crate::models::record::LedgerRecord;
use crate::models::Variant;
use crate::pdf::DocumentReader;

/// Outcome of one attempt to read a record at the cursor.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanStep<R> {
    /// A record was recognised; move the cursor past `advance` lines.
    Parsed { record: R, advance: usize },
    /// No record here; move the cursor by one line.
    Skip,
}

/// A fixed-window record recogniser for one layout.
pub trait BlockScanner {
    type Record;

    /// Lines that must be available from the cursor for one attempt.
    fn window(&self) -> usize;

    /// Try to read one record starting at `cursor`.
    ///
    /// Callers guarantee `cursor + self.window() <= lines.len()`.
    fn try_parse_at(&self, lines: &[String], cursor: usize) -> ScanStep<Self::Record>;
}

/// Run a scanner over the whole line sequence.
pub fn scan<S: BlockScanner>(scanner: &S, lines: &[String]) -> Vec<S::Record> {
    let window = scanner.window();
    let mut records = Vec::new();
    let mut cursor = 0;

    while lines.len().saturating_sub(cursor) >= window.max(1) {
        match scanner.try_parse_at(lines, cursor) {
            ScanStep::Parsed { record, advance } => {
                records.push(record);
                cursor = cursor.saturating_add(advance.max(1));
            }
            ScanStep::Skip => cursor += 1,
        }
    }

    records
}

/// Records recovered from one document.
#[derive(Debug, Clone)]
pub struct ExtractionResult<R> {
    /// Records in document order.
    pub records: Vec<R>,
    /// Quotation date found in the document.
    pub quotation_date: Option<String>,
    /// Number of lines scanned.
    pub line_count: usize,
    /// Informational warnings, e.g. no records found.
    pub warnings: Vec<String>,
}

impl<R> ExtractionResult<R> {
    fn new(records: Vec<R>, quotation_date: Option<String>, line_count: usize) -> Self {
        let mut warnings = Vec::new();
        if records.is_empty() {
            warn!("No line items found in {} lines", line_count);
            warnings.push(format!("no line items found in {} lines", line_count));
        } else {
            debug!("Accepted {} line items from {} lines", records.len(), line_count);
        }

        Self {
            records,
            quotation_date,
            line_count,
            warnings,
        }
    }

    /// True when the document yielded no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parses a document's lines into the records of one layout.
pub trait LayoutParser {
    type Record: LedgerRecord;

    /// Layout handled by this parser.
    fn variant(&self) -> Variant;

    /// Extract records from a line sequence.
    fn parse_lines(&self, lines: &[String]) -> ExtractionResult<Self::Record>;

    /// Read a document and extract its records.
    fn parse_document<D: DocumentReader>(
        &self,
        reader: &D,
        data: &[u8],
    ) -> Result<ExtractionResult<Self::Record>, DocumentError> {
        let lines = reader.read_lines(data)?;
        Ok(self.parse_lines(&lines))
    }
}

#[cfg(test)]
pub(crate) fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Accepts any line equal to "hit" and consumes three lines.
    struct HitScanner;

    impl BlockScanner for HitScanner {
        type Record = usize;

        fn window(&self) -> usize {
            3
        }

        fn try_parse_at(&self, lines: &[String], cursor: usize) -> ScanStep<usize> {
            if lines[cursor] == "hit" {
                ScanStep::Parsed { record: cursor, advance: 3 }
            } else {
                ScanStep::Skip
            }
        }
    }

    #[test]
    fn test_scan_advances_by_block_on_hit() {
        let input = lines(&["hit", "hit", "hit", "hit", "x", "x"]);
        assert_eq!(scan(&HitScanner, &input), vec![0, 3]);
    }

    #[test]
    fn test_scan_resyncs_one_line_on_skip() {
        let input = lines(&["x", "hit", "x", "x", "x"]);
        assert_eq!(scan(&HitScanner, &input), vec![1]);
    }

    #[test]
    fn test_scan_stops_before_short_tail() {
        let input = lines(&["x", "x", "hit", "x"]);
        assert_eq!(scan(&HitScanner, &input), Vec::<usize>::new());
    }

    #[test]
    fn test_scan_handles_input_shorter_than_window() {
        assert!(scan(&HitScanner, &lines(&["hit"])).is_empty());
        assert!(scan(&HitScanner, &[]).is_empty());
    }

    /// Reports a window larger than any document.
    struct WideScanner;

    impl BlockScanner for WideScanner {
        type Record = usize;

        fn window(&self) -> usize {
            usize::MAX
        }

        fn try_parse_at(&self, _lines: &[String], cursor: usize) -> ScanStep<usize> {
            ScanStep::Parsed { record: cursor, advance: usize::MAX }
        }
    }

    #[test]
    fn test_scan_with_oversized_window_finds_nothing() {
        assert!(scan(&WideScanner, &lines(&["a", "b", "c"])).is_empty());
    }

    #[test]
    fn test_empty_result_warns() {
        let result: ExtractionResult<usize> = ExtractionResult::new(Vec::new(), None, 12);
        assert!(result.is_empty());
        assert_eq!(result.warnings.len(), 1);
    }
}
