//! Embedded PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{Result, TextSource};
use crate::error::SourceError;

/// Text source for PDFs that carry a text layer.
///
/// Scanned PDFs without one yield blank text, which the caller reports as
/// [`SourceError::NoText`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl PdfTextSource {
    pub fn new() -> Self {
        Self
    }

    /// Parse `data`, decrypting PDFs protected with an empty password.
    ///
    /// Returns the bytes pdf-extract should read.
    fn prepare(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut doc = Document::load_mem(data).map_err(|e| SourceError::Parse(e.to_string()))?;

        let raw_data = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(SourceError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| SourceError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            decrypted
        } else {
            data.to_vec()
        };

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(SourceError::NoPages);
        }
        debug!("Loaded PDF with {} pages", page_count);

        Ok(raw_data)
    }
}

impl TextSource for PdfTextSource {
    fn recognize(&self, data: &[u8]) -> Result<String> {
        let raw_data = self.prepare(data)?;
        pdf_extract::extract_text_from_mem(&raw_data)
            .map_err(|e| SourceError::TextExtraction(e.to_string()))
    }
}
