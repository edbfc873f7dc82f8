//! Core library for vendor quotation line-item extraction.
//!
//! This crate provides:
//! - PDF processing (per-page text flattened into a line sequence)
//! - Block scanners for the two supported vendor quotation layouts
//! - Line-item models and session tables tagged by source file
//! - Ledger consolidation into persisted, deduplicated partitions

pub mod error;
pub mod ledger;
pub mod models;
pub mod pdf;
pub mod quote;

pub use error::{DocumentError, LedgerError, PersistenceError, Result};
pub use ledger::{consolidate, Consolidation, CsvMasterStore, MasterStore};
pub use models::config::LedgerConfig;
pub use models::record::{LedgerRecord, PartItem, QuoteItem, UnitOfMeasure};
pub use models::table::{BatchContext, FileSummary, RecordTable};
pub use models::{ValidationMode, Variant};
pub use pdf::{DocumentReader, PdfExtractor};
pub use quote::{
    ExtractionResult, LayoutParser, PartsLayoutParser, QuoteLayoutParser, ScanStep,
};
