//! Financial document field extraction module.

mod parser;
pub mod rules;

pub use parser::{reference_number, ExtractionResult, FinancialExtractor};

use chrono::{DateTime, Utc};

use crate::error::ExtractionError;
use crate::models::record::ExtractedFinancialRecord;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Trait for turning recognized document text into a financial record.
pub trait DocumentExtractor {
    /// Extract a record stamped with the current time.
    fn extract(
        &self,
        text: &str,
        source_file_name: &str,
        external_reference_id: &str,
    ) -> Result<ExtractedFinancialRecord> {
        self.extract_at(text, source_file_name, external_reference_id, Utc::now())
    }

    /// Extract a record stamped with `timestamp`.
    fn extract_at(
        &self,
        text: &str,
        source_file_name: &str,
        external_reference_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<ExtractedFinancialRecord>;
}
