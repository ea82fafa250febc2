//! Financial record extracted from a single document.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Structured result of one document extraction.
///
/// Built once per extraction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedFinancialRecord {
    /// Presumed transaction total: the largest amount found in the text.
    pub amount: Decimal,

    /// Vendor name following a label such as `vendor:`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,

    /// Date exactly as it appeared in the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Description following a label such as `description:`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Document classification.
    #[serde(default)]
    pub category: DocumentCategory,

    /// File name of the originating document.
    pub source: String,

    /// Creation time of this record.
    pub timestamp: DateTime<Utc>,

    /// Business entity (e.g. job) the record is attached to.
    pub external_reference_id: String,
}

impl ExtractedFinancialRecord {
    /// Whether the record carries a usable (positive) amount.
    pub fn is_valid(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Names of the optional fields that were not found.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.vendor.is_none() {
            missing.push("vendor");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.description.is_none() {
            missing.push("description");
        }
        if self.category == DocumentCategory::Unknown {
            missing.push("category");
        }
        missing
    }
}

/// Closed set of financial document kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    /// Invoice (`invoice`, `inv#`).
    Invoice,
    /// Receipt.
    Receipt,
    /// Quote or estimate.
    Quote,
    /// Bill or statement.
    Bill,
    /// Nothing recognizable.
    #[default]
    Unknown,
}

impl DocumentCategory {
    /// Lowercase name as used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::Invoice => "invoice",
            DocumentCategory::Receipt => "receipt",
            DocumentCategory::Quote => "quote",
            DocumentCategory::Bill => "bill",
            DocumentCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn record() -> ExtractedFinancialRecord {
        ExtractedFinancialRecord {
            amount: Decimal::from_str("250.00").unwrap(),
            vendor: Some("acme supplies".to_string()),
            date: None,
            description: None,
            category: DocumentCategory::Invoice,
            source: "acme.pdf".to_string(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            external_reference_id: "job-17".to_string(),
        }
    }

    #[test]
    fn test_record_serializes_camel_case_and_skips_absent() {
        let json = serde_json::to_value(record()).unwrap();

        assert_eq!(json["externalReferenceId"], "job-17");
        assert_eq!(json["category"], "invoice");
        assert_eq!(json["amount"], "250.00");
        assert_eq!(json["timestamp"], "2024-03-01T09:30:00Z");
        assert!(json.get("date").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_record_roundtrips_through_json() {
        let original = record();
        let json = serde_json::to_string(&original).unwrap();
        let parsed: ExtractedFinancialRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_validity_requires_positive_amount() {
        let mut r = record();
        assert!(r.is_valid());
        r.amount = Decimal::ZERO;
        assert!(!r.is_valid());
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(record().missing_fields(), vec!["date", "description"]);
    }
}
