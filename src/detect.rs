//! Input format detection and validation.
//!
//! The pipeline consumes page geometry produced by an external extractor, either as
//! plain JSON or gzip-compressed JSON. Raw PDF files are recognized so they can be
//! rejected with a useful message instead of a JSON syntax error.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Recognized input kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Plain UTF-8 JSON page-geometry document
    LayoutJson,
    /// Gzip-compressed page-geometry document
    LayoutJsonGzip,
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::LayoutJson => write!(f, "layout JSON"),
            InputFormat::LayoutJsonGzip => write!(f, "gzip layout JSON"),
        }
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];
const HEADER_LEN: usize = 64;

/// Detect the input format from a file path.
///
/// # Example
/// ```no_run
/// use unexam::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("exam.layout.json").unwrap();
/// println!("input: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<InputFormat> {
    let mut file = File::open(path)?;
    let mut header = Vec::with_capacity(HEADER_LEN);
    file.by_ref()
        .take(HEADER_LEN as u64)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the input format from the leading bytes of the input.
///
/// # Returns
/// * `Ok(InputFormat)` for JSON or gzip input
/// * `Err(Error::UnsupportedInput)` for raw PDF bytes
/// * `Err(Error::UnknownFormat)` for anything else
pub fn detect_format_from_bytes(data: &[u8]) -> Result<InputFormat> {
    if data.starts_with(PDF_MAGIC) {
        return Err(Error::UnsupportedInput(
            "raw PDF input needs an external page-geometry extractor".to_string(),
        ));
    }

    if data.starts_with(GZIP_MAGIC) {
        return Ok(InputFormat::LayoutJsonGzip);
    }

    match strip_bom(data).iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') => Ok(InputFormat::LayoutJson),
        _ => Err(Error::UnknownFormat),
    }
}

/// The input without a leading UTF-8 byte order mark.
pub(crate) fn strip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(UTF8_BOM).unwrap_or(data)
}

/// Check if bytes look like a supported input.
pub fn is_supported_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
