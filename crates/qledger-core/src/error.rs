//! Error types for the qledger-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the qledger library.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Document could not be read as a PDF.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// Master store could not be read or written.
    #[error("persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to reading a quotation document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to the persisted master store.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The partition file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The partition could not be written.
    #[error("failed to write {path}: {reason}")]
    Write { path: PathBuf, reason: String },

    /// A stored row does not match the partition's columns.
    #[error("malformed row {row} in {path}: {reason}")]
    MalformedRow {
        path: PathBuf,
        row: usize,
        reason: String,
    },

    /// A spreadsheet workbook could not be opened or read.
    #[error("workbook error: {0}")]
    Workbook(String),

    /// I/O error while preparing the store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the qledger library.
pub type Result<T> = std::result::Result<T, LedgerError>;
