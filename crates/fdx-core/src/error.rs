//! Error types for the fdx-core library.

use thiserror::Error;

/// Main error type for the fdx library.
#[derive(Error, Debug)]
pub enum FdxError {
    /// Document text could not be obtained.
    #[error("text source error: {0}")]
    Source(#[from] SourceError),

    /// Financial field extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Document history error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning a document into text.
///
/// These stand in for failures of the upstream text recognizer.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to open/parse the document.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// Failed to extract text from the document.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The recognizer produced no usable text.
    #[error("no text recognized in {0}")]
    NoText(String),

    /// The document needs a recognizer this build does not carry.
    #[error("no text recognizer available for .{0} documents; supply recognized text instead")]
    RecognizerUnavailable(String),

    /// The file extension is not a supported document type.
    #[error("unsupported document type: {0}")]
    Unsupported(String),

    /// Reading the document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to financial field extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No `$`-prefixed amount was found. Terminal for this input.
    #[error("no financial amount found in document text")]
    NoAmountFound,
}

/// Errors related to document history persistence.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not valid history JSON.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for the fdx library.
pub type Result<T> = std::result::Result<T, FdxError>;
