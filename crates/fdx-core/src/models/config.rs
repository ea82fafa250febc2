//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::extract::rules::labels::{DESCRIPTION_LABELS, VENDOR_LABELS};

/// Main configuration for fdx.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FdxConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Document text source configuration.
    pub source: SourceConfig,

    /// Document history configuration.
    pub ledger: LedgerConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Vendor label keywords, highest priority first.
    pub vendor_labels: Vec<String>,

    /// Description label keywords, highest priority first.
    pub description_labels: Vec<String>,

    /// Confidence below which a warning is attached to the result.
    pub min_confidence: f32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            vendor_labels: VENDOR_LABELS.iter().map(|s| s.to_string()).collect(),
            description_labels: DESCRIPTION_LABELS.iter().map(|s| s.to_string()).collect(),
            min_confidence: 0.5,
        }
    }
}

/// Document text source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Minimum number of non-whitespace characters to accept recognized text.
    pub min_text_length: usize,

    /// Extensions treated as already-recognized plain text.
    pub text_extensions: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            min_text_length: 1,
            text_extensions: vec!["txt".to_string()],
        }
    }
}

/// Document history configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// JSON file holding per-reference document history.
    pub path: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("fdx-ledger.json"),
        }
    }
}

impl FdxConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_labels() {
        let config = ExtractionConfig::default();
        assert_eq!(
            config.vendor_labels,
            vec!["from:", "vendor:", "supplier:", "bill from:", "company:", "business:"]
        );
        assert_eq!(
            config.description_labels,
            vec!["description:", "details:", "item:", "service:"]
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: FdxConfig =
            serde_json::from_str(r#"{"ledger": {"path": "/tmp/jobs.json"}}"#).unwrap();

        assert_eq!(config.ledger.path, PathBuf::from("/tmp/jobs.json"));
        assert_eq!(config.source.min_text_length, 1);
        assert_eq!(config.extraction.min_confidence, 0.5);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = FdxConfig::default();
        config.extraction.vendor_labels = vec!["payee:".to_string()];
        config.save(&path).unwrap();

        let loaded = FdxConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.vendor_labels, vec!["payee:"]);
    }
}
