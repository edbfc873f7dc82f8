//! PDF processing module.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::DocumentError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// A document-to-text engine producing one text blob per page.
pub trait DocumentReader {
    /// Extract the text of every page, in document order.
    fn read_pages(&self, data: &[u8]) -> Result<Vec<String>>;

    /// Extract the document as one flat line sequence.
    fn read_lines(&self, data: &[u8]) -> Result<Vec<String>> {
        Ok(flatten_pages(self.read_pages(data)?))
    }
}

/// Concatenate per-page text into one line sequence.
///
/// Pages keep their order and each page is split on `\n` only; lines are
/// neither trimmed nor filtered.
pub fn flatten_pages<I, S>(pages: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    pages
        .into_iter()
        .flat_map(|page| {
            page.as_ref()
                .split('\n')
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FixedPages(Vec<&'static str>);

    impl DocumentReader for FixedPages {
        fn read_pages(&self, _data: &[u8]) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|p| p.to_string()).collect())
        }
    }

    #[test]
    fn test_flatten_preserves_page_and_line_order() {
        let lines = flatten_pages(["a\nb", "c\nd\n"]);
        assert_eq!(lines, vec!["a", "b", "c", "d", ""]);
    }

    #[test]
    fn test_flatten_does_not_trim() {
        let lines = flatten_pages(["  X1 \n\tDesc"]);
        assert_eq!(lines, vec!["  X1 ", "\tDesc"]);
    }

    #[test]
    fn test_read_lines_uses_pages() {
        let reader = FixedPages(vec!["Date: 2024-01-02\nX1", "Desc"]);
        let lines = reader.read_lines(&[]).unwrap();
        assert_eq!(lines, vec!["Date: 2024-01-02", "X1", "Desc"]);
    }
}
