//! # unexam
//!
//! Exam question reconstruction from two-column PDF page geometry.
//!
//! Printed multiple-choice exams are laid out in two columns, with choices
//! marked ①–④ and some choices rendered as tables. This library takes the page
//! geometry an extractor reports (words with coordinates, table regions, image
//! counts) and rebuilds a structured exam: numbered questions with exactly four
//! choices, shared instructions, table attachments and header metadata.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unexam::{extract_file, render};
//!
//! fn main() -> unexam::Result<()> {
//!     // Load an extractor dump and rebuild the exam
//!     let doc = extract_file("exam.layout.json")?;
//!
//!     // Write it out as JSON
//!     let json = render::to_json(&doc, render::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Column-aware text**: each half of the page is read on its own
//! - **Table choices**: tables are matched to ①–④ by proximity, or by a 2×2 grid
//! - **Shared instructions**: `※ ... (5∼7)` is linked to questions 5 through 7
//! - **Pluggable geometry**: anything implementing [`source::PageSource`] works
//! - **Parallel batches**: independent documents are processed with Rayon

pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, InputFormat};
pub use error::{Error, Result};
pub use model::{
    BoundingBox, ChoiceType, ExamDocument, ExamMetadata, ImageRef, Instruction, Point,
    Question, TableGrid, TableRegion, CHOICE_COUNT,
};
pub use parser::{ColumnText, ErrorMode, ExamExtractor, ExtractOptions, Extraction, PageSelection};
pub use render::{ExtractionStats, JsonFormat};
pub use source::{DocumentSource, LayoutDocument, PageSource, TableSettings};

use std::io::Read;
use std::path::Path;

use rayon::prelude::*;

/// Reconstruct an exam from a page-geometry dump on disk.
///
/// # Arguments
///
/// * `path` - Path to a JSON or gzip-compressed JSON dump
///
/// # Example
///
/// ```no_run
/// use unexam::extract_file;
///
/// let doc = extract_file("exam.layout.json").unwrap();
/// println!("Questions: {}", doc.total_questions);
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<ExamDocument> {
    extract_file_with_options(path, &ExtractOptions::default()).map(|e| e.document)
}

/// Reconstruct an exam from a dump on disk with custom options.
///
/// # Example
///
/// ```no_run
/// use unexam::{extract_file_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new()
///     .strict()
///     .with_term(2023, 1);
/// let extraction = extract_file_with_options("exam.layout.json", &options).unwrap();
/// ```
pub fn extract_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<Extraction> {
    let source = LayoutDocument::open(path)?;
    extract_document(&source, options)
}

/// Reconstruct an exam from dump bytes.
///
/// # Example
///
/// ```no_run
/// use unexam::extract_bytes;
///
/// let data = std::fs::read("exam.layout.json").unwrap();
/// let doc = extract_bytes(&data).unwrap();
/// ```
pub fn extract_bytes(data: &[u8]) -> Result<ExamDocument> {
    extract_bytes_with_options(data, &ExtractOptions::default()).map(|e| e.document)
}

/// Reconstruct an exam from dump bytes with custom options.
pub fn extract_bytes_with_options(data: &[u8], options: &ExtractOptions) -> Result<Extraction> {
    let source = LayoutDocument::from_bytes(data)?;
    extract_document(&source, options)
}

/// Reconstruct an exam from a reader.
///
/// # Example
///
/// ```no_run
/// use unexam::extract_reader;
/// use std::fs::File;
///
/// let file = File::open("exam.layout.json.gz").unwrap();
/// let doc = extract_reader(file).unwrap();
/// ```
pub fn extract_reader<R: Read>(reader: R) -> Result<ExamDocument> {
    let source = LayoutDocument::from_reader(reader)?;
    extract_document(&source, &ExtractOptions::default()).map(|e| e.document)
}

/// Reconstruct an exam from any page-geometry source.
///
/// This is the entry point for custom extractors implementing
/// [`DocumentSource`].
pub fn extract_document<D: DocumentSource + ?Sized>(
    source: &D,
    options: &ExtractOptions,
) -> Result<Extraction> {
    ExamExtractor::new(options.clone()).extract(source)
}

/// Reconstruct several dumps in parallel.
///
/// Documents are independent; results come back in input order.
///
/// # Example
///
/// ```no_run
/// use unexam::{extract_batch, ExtractOptions};
///
/// let results = extract_batch(&["a.json", "b.json"], &ExtractOptions::default());
/// for result in results {
///     match result {
///         Ok(extraction) => println!("{} questions", extraction.document.total_questions),
///         Err(e) => eprintln!("failed: {}", e),
///     }
/// }
/// ```
pub fn extract_batch<P: AsRef<Path> + Sync>(
    paths: &[P],
    options: &ExtractOptions,
) -> Vec<Result<Extraction>> {
    paths
        .par_iter()
        .map(|path| {
            let result = extract_file_with_options(path, options);
            if let Err(e) = &result {
                log::warn!("Failed to extract {}: {}", path.as_ref().display(), e);
            }
            result
        })
        .collect()
}

/// Reconstruct an exam from a dump on disk without blocking the async runtime.
///
/// The file is read with Tokio and the extraction runs on the blocking pool.
#[cfg(feature = "async")]
pub async fn extract_file_async<P: AsRef<Path>>(
    path: P,
    options: ExtractOptions,
) -> Result<Extraction> {
    let data = tokio::fs::read(path).await?;
    tokio::task::spawn_blocking(move || extract_bytes_with_options(&data, &options))
        .await
        .map_err(|e| Error::Other(format!("extraction task failed: {}", e)))?
}

/// Reconstruct an exam and render it as JSON.
///
/// # Example
///
/// ```no_run
/// use unexam::{to_json, JsonFormat};
///
/// let json = to_json("exam.layout.json", JsonFormat::Pretty).unwrap();
/// std::fs::write("questions.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = extract_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for reconstructing exams.
///
/// # Example
///
/// ```no_run
/// use unexam::Unexam;
///
/// let json = Unexam::new()
///     .with_image_dir("./images")
///     .with_term(2024, 1)
///     .lenient()
///     .extract("exam.layout.json")?
///     .to_json()?;
/// # Ok::<(), unexam::Error>(())
/// ```
pub struct Unexam {
    options: ExtractOptions,
    format: JsonFormat,
}

impl Unexam {
    /// Create a new Unexam builder.
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
            format: JsonFormat::Pretty,
        }
    }

    /// Skip faulty pages and tables.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Fail on the first page or table fault.
    pub fn strict(mut self) -> Self {
        self.options = self.options.strict();
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.options = self.options.with_pages(pages);
        self
    }

    /// Set the image manifest directory.
    pub fn with_image_dir(mut self, dir: impl Into<String>) -> Self {
        self.options = self.options.with_image_dir(dir);
        self
    }

    /// Set the fallback year and semester.
    pub fn with_term(mut self, year: i32, semester: u32) -> Self {
        self.options = self.options.with_term(year, semester);
        self
    }

    /// Set the subject row keywords.
    pub fn with_subject_keywords<S: Into<String>>(
        mut self,
        keywords: impl IntoIterator<Item = S>,
    ) -> Self {
        self.options = self.options.with_subject_keywords(keywords);
        self
    }

    /// Set table detection settings.
    pub fn with_table_settings(mut self, settings: TableSettings) -> Self {
        self.options = self.options.with_table_settings(settings);
        self
    }

    /// Render compact JSON.
    pub fn compact(mut self) -> Self {
        self.format = JsonFormat::Compact;
        self
    }

    /// Reconstruct an exam from a dump on disk.
    pub fn extract<P: AsRef<Path>>(self, path: P) -> Result<UnexamResult> {
        let extraction = extract_file_with_options(path, &self.options)?;
        Ok(UnexamResult {
            extraction,
            format: self.format,
        })
    }

    /// Reconstruct an exam from dump bytes.
    pub fn extract_bytes(self, data: &[u8]) -> Result<UnexamResult> {
        let extraction = extract_bytes_with_options(data, &self.options)?;
        Ok(UnexamResult {
            extraction,
            format: self.format,
        })
    }

    /// Reconstruct an exam from any page-geometry source.
    pub fn extract_source<D: DocumentSource + ?Sized>(self, source: &D) -> Result<UnexamResult> {
        let extraction = extract_document(source, &self.options)?;
        Ok(UnexamResult {
            extraction,
            format: self.format,
        })
    }
}

impl Default for Unexam {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of reconstructing an exam.
pub struct UnexamResult {
    /// The extraction
    pub extraction: Extraction,
    /// JSON format to use
    format: JsonFormat,
}

impl UnexamResult {
    /// Convert the document to JSON.
    pub fn to_json(&self) -> Result<String> {
        render::to_json(&self.extraction.document, self.format)
    }

    /// Convert the table regions to JSON.
    pub fn to_tables_json(&self) -> Result<String> {
        render::to_tables_json(&self.extraction.document.tables, self.format)
    }

    /// Get the per-page column text.
    pub fn to_text(&self) -> String {
        render::to_page_text(&self.extraction.pages)
    }

    /// Get extraction statistics.
    pub fn stats(&self) -> ExtractionStats {
        ExtractionStats::from_extraction(&self.extraction)
    }

    /// Get the document.
    pub fn document(&self) -> &ExamDocument {
        &self.extraction.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LayoutPage;

    fn sample_json() -> Vec<u8> {
        let doc = LayoutDocument::new(vec![LayoutPage::a4(1)
            .with_text_line(40.0, 80.0, "1. 다음 중 옳은 것은?")
            .with_text_line(40.0, 100.0, "①가 ②나 ③다 ④라")]);
        serde_json::to_vec(&doc).unwrap()
    }

    #[test]
    fn test_unexam_builder() {
        let unexam = Unexam::new().strict().with_term(2023, 1).compact();

        assert!(matches!(unexam.options.error_mode, ErrorMode::Strict));
        assert_eq!(unexam.options.default_year, 2023);
        assert_eq!(unexam.options.default_semester, 1);
        assert_eq!(unexam.format, JsonFormat::Compact);
    }

    #[test]
    fn test_unexam_builder_default() {
        let builder = Unexam::default();
        assert!(matches!(builder.options.error_mode, ErrorMode::Lenient));
        assert_eq!(builder.format, JsonFormat::Pretty);
    }

    #[test]
    fn test_unexam_builder_with_pages() {
        let builder = Unexam::new().with_pages(PageSelection::Range(1..=5));
        assert!(matches!(builder.options.pages, PageSelection::Range(_)));
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_extract_bytes_empty_data() {
        let result = extract_bytes(&[]);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_extract_bytes_rejects_pdf() {
        let result = extract_bytes(b"%PDF-1.7\n%test");
        assert!(matches!(result, Err(Error::UnsupportedInput(_))));
    }

    #[test]
    fn test_extract_bytes_malformed_json() {
        let result = extract_bytes(b"{\"pages\": [");
        assert!(matches!(result, Err(Error::Layout(_))));
    }

    #[test]
    fn test_extract_bytes() {
        let doc = extract_bytes(&sample_json()).unwrap();
        assert_eq!(doc.total_questions, 1);
        assert_eq!(doc.questions[0].choices[3], "라");
    }

    #[test]
    fn test_extract_reader() {
        let data = sample_json();
        let doc = extract_reader(data.as_slice()).unwrap();
        assert_eq!(doc.questions[0].stem, "다음 중 옳은 것은?");
    }

    #[test]
    fn test_unexam_result_outputs() {
        let result = Unexam::new().compact().extract_bytes(&sample_json()).unwrap();

        assert!(!result.to_json().unwrap().contains('\n'));
        assert_eq!(result.to_tables_json().unwrap(), "[]");
        assert!(result.to_text().starts_with("===== 페이지 1 =====\n1. 다음"));
        assert_eq!(result.stats().question_count, 1);
        assert_eq!(result.document().year, 2024);
    }

    #[test]
    fn test_extract_batch_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        std::fs::write(&good, sample_json()).unwrap();
        std::fs::write(&bad, b"not json").unwrap();

        let results = extract_batch(&[&good, &bad], &ExtractOptions::default());
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(Error::UnknownFormat)));
    }
}
