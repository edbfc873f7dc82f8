//! PDF page text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, warn};

use super::{DocumentReader, Result};
use crate::error::DocumentError;

/// PDF text extractor.
///
/// pdf-extract does the text layout; lopdf validates the document, removes
/// empty-password encryption, and serves as a per-page fallback.
#[derive(Default)]
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a PDF from bytes.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| DocumentError::Parse(e.to_string()))?;

        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(DocumentError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| DocumentError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(DocumentError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    /// Get the number of pages in the loaded PDF.
    pub fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    /// Extract the text of each page of the loaded PDF, in page order.
    pub fn extract_pages(&self) -> Result<Vec<String>> {
        let doc = self
            .document
            .as_ref()
            .ok_or_else(|| DocumentError::Parse("no document loaded".to_string()))?;

        match pdf_extract::extract_text_from_mem_by_pages(&self.raw_data) {
            Ok(pages) => {
                debug!("pdf-extract returned {} pages", pages.len());
                Ok(pages)
            }
            Err(e) => {
                warn!("pdf-extract failed ({}), falling back to lopdf text extraction", e);
                self.extract_pages_lopdf(doc)
            }
        }
    }

    fn extract_pages_lopdf(&self, doc: &Document) -> Result<Vec<String>> {
        doc.get_pages()
            .keys()
            .map(|&page| {
                doc.extract_text(&[page])
                    .map_err(|e| DocumentError::TextExtraction(format!("page {}: {}", page, e)))
            })
            .collect()
    }
}

impl DocumentReader for PdfExtractor {
    fn read_pages(&self, data: &[u8]) -> Result<Vec<String>> {
        let mut extractor = PdfExtractor::new();
        extractor.load(data)?;
        extractor.extract_pages()
    }
}
