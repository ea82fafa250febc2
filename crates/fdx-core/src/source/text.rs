//! Plain-text documents (recognizer output saved alongside the upload).

use super::{Result, TextSource};
use crate::error::SourceError;

/// Reads already-recognized text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl PlainTextSource {
    pub fn new() -> Self {
        Self
    }
}

impl TextSource for PlainTextSource {
    fn recognize(&self, data: &[u8]) -> Result<String> {
        let text = String::from_utf8(data.to_vec())
            .map_err(|e| SourceError::TextExtraction(e.to_string()))?;

        // Drop a UTF-8 byte order mark left by some OCR exports.
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }
}
