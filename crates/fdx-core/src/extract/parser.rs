//! Financial document extractor composing the field rules.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::record::{DocumentCategory, ExtractedFinancialRecord};

use super::rules::{
    amounts::{max_amount, AmountExtractor},
    category::CategoryExtractor,
    dates::DateExtractor,
    labels::LabelExtractor,
    FieldExtractor,
};
use super::{DocumentExtractor, Result};

/// Extracted record together with diagnostics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Extracted financial record.
    pub record: ExtractedFinancialRecord,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Overall extraction confidence (0.0 - 1.0).
    pub confidence: f32,
    /// Human-readable reference for the processed document.
    pub reference_number: String,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Stateless extractor for financial documents.
///
/// Construct once and share by reference; extraction never mutates it.
#[derive(Debug, Clone)]
pub struct FinancialExtractor {
    vendor: LabelExtractor,
    description: LabelExtractor,
    /// Confidence below which a warning is attached.
    min_confidence: f32,
}

impl FinancialExtractor {
    /// Create an extractor with the default label lists.
    pub fn new() -> Self {
        Self {
            vendor: LabelExtractor::vendor(),
            description: LabelExtractor::description(),
            min_confidence: 0.5,
        }
    }

    /// Create an extractor from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_vendor_labels(config.vendor_labels.iter().cloned())
            .with_description_labels(config.description_labels.iter().cloned())
            .with_min_confidence(config.min_confidence)
    }

    /// Replace the vendor labels (highest priority first).
    pub fn with_vendor_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vendor = LabelExtractor::new(labels);
        self
    }

    /// Replace the description labels (highest priority first).
    pub fn with_description_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.description = LabelExtractor::new(labels);
        self
    }

    /// Set the warning threshold for overall confidence.
    pub fn with_min_confidence(mut self, confidence: f32) -> Self {
        self.min_confidence = confidence;
        self
    }

    /// Extract a record and attach diagnostics, stamped with the current time.
    pub fn analyze(
        &self,
        text: &str,
        source_file_name: &str,
        external_reference_id: &str,
    ) -> Result<ExtractionResult> {
        self.analyze_at(text, source_file_name, external_reference_id, Utc::now())
    }

    /// Extract a record and attach diagnostics, stamped with `timestamp`.
    pub fn analyze_at(
        &self,
        text: &str,
        source_file_name: &str,
        external_reference_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<ExtractionResult> {
        let start = Utc::now();

        let record = self.extract_at(text, source_file_name, external_reference_id, timestamp)?;

        let mut warnings: Vec<String> = record
            .missing_fields()
            .into_iter()
            .map(|field| format!("Could not extract {}", field))
            .collect();

        let confidence = confidence_score(&record);
        if confidence < self.min_confidence {
            warnings.push(format!(
                "Extraction confidence {:.2} is below {:.2}",
                confidence, self.min_confidence
            ));
        }

        let reference_number = reference_number(source_file_name, timestamp);

        debug!(
            "Extracted {} {} from {} with confidence {:.2}",
            record.category, record.amount, source_file_name, confidence
        );

        Ok(ExtractionResult {
            record,
            warnings,
            confidence,
            reference_number,
            processing_time_ms: (Utc::now() - start).num_milliseconds().max(0) as u64,
        })
    }
}

impl Default for FinancialExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for FinancialExtractor {
    fn extract_at(
        &self,
        text: &str,
        source_file_name: &str,
        external_reference_id: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<ExtractedFinancialRecord> {
        info!(
            "Extracting financial data from {} ({} characters)",
            source_file_name,
            text.len()
        );

        let text = text.to_lowercase();

        let amounts: Vec<Decimal> = AmountExtractor::new()
            .extract_all(&text)
            .into_iter()
            .map(|m| m.value)
            .collect();
        let amount = max_amount(&amounts).ok_or(ExtractionError::NoAmountFound)?;
        debug!("Found {} amounts, using {}", amounts.len(), amount);

        let date = DateExtractor::new().extract(&text).map(|m| m.value);
        let vendor = self.vendor.extract(&text).map(|m| m.value);
        let description = self.description.extract(&text).map(|m| m.value);
        let category = CategoryExtractor::new().classify(&text);

        Ok(ExtractedFinancialRecord {
            amount,
            vendor,
            date,
            description,
            category,
            source: source_file_name.to_string(),
            timestamp,
            external_reference_id: external_reference_id.to_string(),
        })
    }
}

/// Heuristic confidence for a record: 0.5 base plus credit for each field found.
fn confidence_score(record: &ExtractedFinancialRecord) -> f32 {
    let mut score = 0.5f32;

    if record.amount > Decimal::ZERO {
        score += 0.2;
    }
    if record.vendor.is_some() {
        score += 0.1;
    }
    if record.date.is_some() {
        score += 0.1;
    }
    if record.category != DocumentCategory::Unknown {
        score += 0.1;
    }

    score.min(1.0)
}

/// Build a document reference such as `AI-456789-ACME`.
///
/// Combines the last six digits of the millisecond timestamp with the last
/// four characters of the file name before its first dot.
pub fn reference_number(file_name: &str, timestamp: DateTime<Utc>) -> String {
    let millis = timestamp.timestamp_millis().to_string();
    let millis_tail = &millis[millis.len().saturating_sub(6)..];

    let stem = file_name.split('.').next().unwrap_or_default();
    let stem_chars: Vec<char> = stem.chars().collect();
    let stem_tail: String = stem_chars[stem_chars.len().saturating_sub(4)..].iter().collect();

    format!("AI-{}-{}", millis_tail, stem_tail).to_uppercase()
}
