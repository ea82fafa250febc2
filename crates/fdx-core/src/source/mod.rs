//! Document text sources.
//!
//! A text source stands in for the upstream recognizer: it turns a stored
//! document into the full text the extractor works on.

#[cfg(feature = "native")]
mod pdf;
mod text;

#[cfg(feature = "native")]
pub use pdf::PdfTextSource;
pub use text::PlainTextSource;

use std::path::Path;

use tracing::debug;

use crate::error::SourceError;
use crate::models::config::SourceConfig;

/// Result type for text source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Kind of document, decided by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Already-recognized text.
    Text,
    /// PDF with (possibly) embedded text.
    Pdf,
    /// Raster image; needs an OCR service.
    Image,
}

impl DocumentKind {
    /// Classify a path by its extension.
    pub fn from_path(path: &Path, config: &SourceConfig) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        if config
            .text_extensions
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(&extension))
        {
            return Ok(DocumentKind::Text);
        }

        match extension.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "jpg" | "jpeg" | "png" => Ok(DocumentKind::Image),
            _ => Err(SourceError::Unsupported(extension)),
        }
    }
}

/// Trait for document-to-text collaborators.
pub trait TextSource {
    /// Return the full recognized text of `data`.
    fn recognize(&self, data: &[u8]) -> Result<String>;
}

/// Read `path` and recognize its text with the source matching its kind.
///
/// Fails with [`SourceError::NoText`] when the recognized text is shorter
/// than `config.min_text_length` non-whitespace characters.
pub fn read_document(path: &Path, config: &SourceConfig) -> Result<String> {
    let kind = DocumentKind::from_path(path, config)?;
    debug!("Reading {} as {:?}", path.display(), kind);

    let text = match kind {
        DocumentKind::Image => {
            let extension = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();
            return Err(SourceError::RecognizerUnavailable(extension));
        }
        DocumentKind::Text => PlainTextSource::new().recognize(&std::fs::read(path)?)?,
        #[cfg(feature = "native")]
        DocumentKind::Pdf => PdfTextSource::new().recognize(&std::fs::read(path)?)?,
        #[cfg(not(feature = "native"))]
        DocumentKind::Pdf => return Err(SourceError::RecognizerUnavailable("pdf".to_string())),
    };

    ensure_text(text, config.min_text_length, &path.display().to_string())
}

/// Reject text with fewer than `min_length` non-whitespace characters.
pub fn ensure_text(text: String, min_length: usize, origin: &str) -> Result<String> {
    let significant = text.chars().filter(|c| !c.is_whitespace()).count();
    if significant < min_length.max(1) {
        return Err(SourceError::NoText(origin.to_string()));
    }
    Ok(text)
}
