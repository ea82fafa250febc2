//! Core library for financial document extraction.
//!
//! This crate provides:
//! - Heuristic field extraction (amount, date, vendor, description, category)
//!   from recognized document text
//! - Text sources for plain text and PDF documents
//! - A per-reference document ledger
//! - Property boundary measurements and address parsing helpers

pub mod address;
pub mod error;
pub mod extract;
pub mod ledger;
pub mod models;
pub mod source;
pub mod survey;

pub use address::{expand_street_type, parse_address_description, AddressComponents};
pub use error::{ExtractionError, FdxError, Result, SourceError, StoreError};
pub use extract::{reference_number, DocumentExtractor, ExtractionResult, FinancialExtractor};
pub use ledger::{
    total_amount, ApprovalStatus, DocumentEntry, JsonFileStore, MemoryStore, RecordStore,
};
pub use models::config::FdxConfig;
pub use models::record::{DocumentCategory, ExtractedFinancialRecord};
pub use source::{read_document, DocumentKind, PlainTextSource, TextSource};
#[cfg(feature = "native")]
pub use source::PdfTextSource;
pub use survey::{boundary_measurements, total_measurements, Coordinate, Measurement};
