//! Error types for unexam library.

use std::io;
use thiserror::Error;

/// Result type alias for unexam operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during exam reconstruction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a recognized page-geometry document.
    #[error("Unknown input format: expected a page-geometry JSON document")]
    UnknownFormat,

    /// The input was recognized but cannot be processed directly.
    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    /// The page-geometry document is malformed.
    #[error("Invalid page layout: {0}")]
    Layout(String),

    /// Error extracting column text from a page.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Error detecting or reading a table region.
    #[error("Table extraction error: {0}")]
    TableExtract(String),

    /// Error reading positioned words from a page.
    #[error("Word extraction error: {0}")]
    WordExtract(String),

    /// Error enumerating images on a page.
    #[error("Image extraction error: {0}")]
    ImageExtract(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.into())
        } else {
            Error::Layout(err.to_string())
        }
    }
}
