//! Per-reference document history.
//!
//! Every processed document is appended under its external reference id,
//! with or without extracted financial data. Entries are never modified or
//! removed once stored.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::models::record::ExtractedFinancialRecord;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Note attached to documents saved without financial data.
pub const NO_DATA_NOTE: &str = "no financial data could be extracted";

/// Approval state chosen when the document was saved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Saved for later review.
    Draft,
    /// Accepted into the financial history.
    #[default]
    Approved,
}

/// One stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEntry {
    /// Business entity the document belongs to.
    pub external_reference_id: String,

    /// Original document file name.
    pub document_name: String,

    /// Approval state.
    pub status: ApprovalStatus,

    /// Extracted financial data, when any was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<ExtractedFinancialRecord>,

    /// Free-text note, e.g. why no data is attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    /// When the entry was stored.
    pub saved_at: DateTime<Utc>,
}

impl DocumentEntry {
    /// Entry carrying an extracted record.
    pub fn extracted(record: ExtractedFinancialRecord, status: ApprovalStatus) -> Self {
        Self {
            external_reference_id: record.external_reference_id.clone(),
            document_name: record.source.clone(),
            status,
            record: Some(record),
            note: None,
            saved_at: Utc::now(),
        }
    }

    /// Entry for a document whose text yielded no financial data.
    pub fn without_data(
        external_reference_id: impl Into<String>,
        document_name: impl Into<String>,
        status: ApprovalStatus,
    ) -> Self {
        Self {
            external_reference_id: external_reference_id.into(),
            document_name: document_name.into(),
            status,
            record: None,
            note: Some(NO_DATA_NOTE.to_string()),
            saved_at: Utc::now(),
        }
    }

    /// Amount of the attached record, if any.
    pub fn amount(&self) -> Option<Decimal> {
        self.record.as_ref().map(|r| r.amount)
    }
}

/// Sum of recorded amounts over approved entries.
pub fn total_amount<'a, I>(entries: I) -> Decimal
where
    I: IntoIterator<Item = &'a DocumentEntry>,
{
    entries
        .into_iter()
        .filter(|e| e.status == ApprovalStatus::Approved)
        .filter_map(DocumentEntry::amount)
        .sum()
}

/// Trait for document history backends.
pub trait RecordStore {
    /// Append an entry under its reference id.
    fn append(&mut self, entry: DocumentEntry) -> Result<()>;

    /// All entries for `external_reference_id`, oldest first.
    fn history(&self, external_reference_id: &str) -> Vec<DocumentEntry>;

    /// Reference ids that have at least one entry.
    fn references(&self) -> Vec<String>;
}

/// In-process history.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Vec<DocumentEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries across all references.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn append(&mut self, entry: DocumentEntry) -> Result<()> {
        self.entries
            .entry(entry.external_reference_id.clone())
            .or_default()
            .push(entry);
        Ok(())
    }

    fn history(&self, external_reference_id: &str) -> Vec<DocumentEntry> {
        self.entries
            .get(external_reference_id)
            .cloned()
            .unwrap_or_default()
    }

    fn references(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// History persisted as a JSON file, rewritten on every append.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        let inner = MemoryStore { entries };
        debug!("Opened {} with {} entries", path.display(), inner.len());

        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.inner.entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn append(&mut self, entry: DocumentEntry) -> Result<()> {
        info!(
            "Saving {} under {}",
            entry.document_name, entry.external_reference_id
        );
        self.inner.append(entry)?;
        self.flush()
    }

    fn history(&self, external_reference_id: &str) -> Vec<DocumentEntry> {
        self.inner.history(external_reference_id)
    }

    fn references(&self) -> Vec<String> {
        self.inner.references()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::DocumentCategory;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn record(reference: &str, amount: &str) -> ExtractedFinancialRecord {
        ExtractedFinancialRecord {
            amount: Decimal::from_str(amount).unwrap(),
            vendor: None,
            date: None,
            description: None,
            category: DocumentCategory::Receipt,
            source: format!("{}.jpg", amount),
            timestamp: Utc::now(),
            external_reference_id: reference.to_string(),
        }
    }

    #[test]
    fn test_memory_store_appends_in_order() {
        let mut store = MemoryStore::new();
        store
            .append(DocumentEntry::extracted(record("job-1", "10.00"), ApprovalStatus::Approved))
            .unwrap();
        store
            .append(DocumentEntry::without_data("job-1", "blurry.png", ApprovalStatus::Draft))
            .unwrap();
        store
            .append(DocumentEntry::extracted(record("job-2", "5.00"), ApprovalStatus::Approved))
            .unwrap();

        let history = store.history("job-1");
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].document_name, "10.00.jpg");
        assert_eq!(history[1].note.as_deref(), Some(NO_DATA_NOTE));
        assert_eq!(store.references(), vec!["job-1", "job-2"]);
        assert_eq!(store.len(), 3);
        assert!(store.history("job-404").is_empty());
    }

    #[test]
    fn test_total_counts_only_approved() {
        let entries = vec![
            DocumentEntry::extracted(record("j", "100.00"), ApprovalStatus::Approved),
            DocumentEntry::extracted(record("j", "40.50"), ApprovalStatus::Approved),
            DocumentEntry::extracted(record("j", "999.00"), ApprovalStatus::Draft),
            DocumentEntry::without_data("j", "x.pdf", ApprovalStatus::Approved),
        ];
        assert_eq!(total_amount(&entries), Decimal::from_str("140.50").unwrap());
    }

    #[test]
    fn test_json_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ledger.json");

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store
                .append(DocumentEntry::extracted(record("job-7", "12.34"), ApprovalStatus::Approved))
                .unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        let history = store.history("job-7");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].amount(), Some(Decimal::from_str("12.34").unwrap()));
    }

    #[test]
    fn test_json_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(JsonFileStore::open(&path), Err(StoreError::Serde(_))));
    }

    #[test]
    fn test_entry_serialization() {
        let entry = DocumentEntry::without_data("job-3", "scan.pdf", ApprovalStatus::Draft);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["externalReferenceId"], "job-3");
        assert_eq!(json["status"], "draft");
        assert!(json.get("record").is_none());
    }
}
