//! Session tables built from per-document extraction results.

use serde::Serialize;

use super::record::LedgerRecord;
use super::{ValidationMode, Variant};

/// Ordered, variant-homogeneous table of line items.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable<R> {
    rows: Vec<R>,
    documents: Vec<FileSummary>,
}

/// Row count extracted from one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub file_name: String,
    pub rows: usize,
}

impl<R: LedgerRecord> RecordTable<R> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// Append one document's records, tagging each with the document name.
    ///
    /// The document shows up in [`summary`](Self::summary) even when it
    /// contributed no rows.
    pub fn append_document(&mut self, file_name: &str, records: impl IntoIterator<Item = R>) {
        let before = self.rows.len();
        self.rows.extend(records.into_iter().map(|mut record| {
            record.set_source_file(file_name);
            record
        }));
        count_rows(&mut self.documents, file_name, self.rows.len() - before);
    }

    /// Append another table's rows after this one's, preserving both orders.
    pub fn extend(&mut self, other: RecordTable<R>) {
        for doc in &other.documents {
            count_rows(&mut self.documents, &doc.file_name, doc.rows);
        }
        self.rows.extend(other.rows);
    }

    /// Row counts per source file, in order of first appearance.
    pub fn summary(&self) -> &[FileSummary] {
        &self.documents
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<R> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R: LedgerRecord> Default for RecordTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: LedgerRecord> From<Vec<R>> for RecordTable<R> {
    fn from(rows: Vec<R>) -> Self {
        let mut documents = Vec::new();
        for row in &rows {
            count_rows(&mut documents, row.source_file(), 1);
        }
        Self { rows, documents }
    }
}

impl<R: LedgerRecord> FromIterator<R> for RecordTable<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

fn count_rows(documents: &mut Vec<FileSummary>, file_name: &str, rows: usize) {
    match documents.iter_mut().find(|d| d.file_name == file_name) {
        Some(entry) => entry.rows += rows,
        None => documents.push(FileSummary {
            file_name: file_name.to_string(),
            rows,
        }),
    }
}

/// Toggles for one extraction batch, owned by the caller.
///
/// The same context applies to every document of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchContext {
    pub variant: Variant,
    pub mode: ValidationMode,
    pub append_to_master: bool,
}

impl BatchContext {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            mode: ValidationMode::default(),
            append_to_master: false,
        }
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_append(mut self, append: bool) -> Self {
        self.append_to_master = append;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::QuoteItem;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn item(number: &str) -> QuoteItem {
        QuoteItem {
            item_number: number.into(),
            description: "Desc".into(),
            category: "Cat".into(),
            quantity: 1,
            net_price: Decimal::ONE,
            amount: Decimal::ONE,
            quotation_date: String::new(),
            source_file: String::new(),
        }
    }

    #[test]
    fn test_append_document_tags_source_file() {
        let mut table = RecordTable::new();
        table.append_document("a.pdf", vec![item("1"), item("2")]);
        table.append_document("b.pdf", vec![item("3")]);

        let sources: Vec<&str> = table.rows().iter().map(|r| r.source_file.as_str()).collect();
        assert_eq!(sources, vec!["a.pdf", "a.pdf", "b.pdf"]);

        let numbers: Vec<&str> = table.rows().iter().map(|r| r.item_number.as_str()).collect();
        assert_eq!(numbers, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_append_keeps_duplicates() {
        let mut table = RecordTable::new();
        table.append_document("a.pdf", vec![item("1")]);
        table.append_document("a.pdf", vec![item("1")]);

        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_summary_counts_per_file() {
        let mut table = RecordTable::new();
        table.append_document("a.pdf", vec![item("1"), item("2")]);
        table.append_document("b.pdf", vec![item("3")]);

        table.append_document("empty.pdf", Vec::new());

        assert_eq!(
            table.summary(),
            &[
                FileSummary { file_name: "a.pdf".into(), rows: 2 },
                FileSummary { file_name: "b.pdf".into(), rows: 1 },
                FileSummary { file_name: "empty.pdf".into(), rows: 0 },
            ]
        );
    }

    #[test]
    fn test_table_from_rows_derives_summary() {
        let mut first = item("1");
        first.source_file = "a.pdf".into();
        let mut second = item("2");
        second.source_file = "a.pdf".into();

        let table: RecordTable<QuoteItem> = vec![first, second].into_iter().collect();
        assert_eq!(
            table.summary(),
            &[FileSummary { file_name: "a.pdf".into(), rows: 2 }]
        );
    }

    #[test]
    fn test_batch_context_builder() {
        let ctx = BatchContext::new(Variant::B)
            .with_mode(ValidationMode::Relaxed)
            .with_append(true);

        assert_eq!(ctx.variant, Variant::B);
        assert_eq!(ctx.mode, ValidationMode::Relaxed);
        assert!(ctx.append_to_master);
    }
}
