//! Error types for leasedeck library.

use std::io;
use thiserror::Error;

/// Result type alias for leasedeck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while generating a report deck.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The request was rejected before the pipeline ran.
    #[error("{0}")]
    InputValidation(String),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// A rendering or export capability could not be obtained.
    #[error("Failed to load {0}")]
    DependencyLoad(String),

    /// The source document is malformed.
    #[error("PDF parsing error: {0}")]
    DocumentParse(String),

    /// The document is encrypted and cannot be rendered.
    #[error("Document is encrypted")]
    Encrypted,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Error decoding or encoding raster data.
    #[error("Image error: {0}")]
    Image(String),

    /// The narrative collaborator did not produce a report.
    ///
    /// Never surfaced by the pipeline; it is downgraded to fallback text.
    #[error("Narrative fetch failed: {0}")]
    NarrativeFetch(NarrativeFailure),

    /// Table pagination produced a non-positive row capacity.
    #[error("Layout overflow: {0}")]
    LayoutOverflow(String),

    /// Error writing the deck archive.
    #[error("Export error: {0}")]
    Export(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

/// Why the narrative collaborator failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrativeFailure {
    /// The collaborator answered with a non-success HTTP status.
    Status(u16),
    /// The collaborator could not be reached or returned an unreadable body.
    Transport(String),
}

impl std::fmt::Display for NarrativeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NarrativeFailure::Status(code) => write!(f, "status {}", code),
            NarrativeFailure::Transport(msg) => write!(f, "transport: {}", msg),
        }
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Export(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", err))
    }
}
