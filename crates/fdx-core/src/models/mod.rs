//! Data models and configuration.

pub mod config;
pub mod record;

pub use config::{ExtractionConfig, FdxConfig, LedgerConfig, SourceConfig};
pub use record::{DocumentCategory, ExtractedFinancialRecord};
