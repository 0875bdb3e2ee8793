//! Page geometry backed by an extractor dump.
//!
//! A dump is a JSON document listing, per page, the positioned words, the table
//! regions already detected with line-based rulings, and the number of embedded
//! images:
//!
//! ```json
//! {
//!   "pages": [{
//!     "number": 1, "width": 595.0, "height": 842.0,
//!     "words": [{"text": "①", "x0": 40.0, "x1": 48.0, "top": 120.0, "bottom": 130.0}],
//!     "tables": [{"bbox": [40.0, 140.0, 280.0, 200.0], "rows": [["A", null]]}],
//!     "images": 0
//!   }]
//! }
//! ```
//!
//! The file may also be gzip-compressed.

use std::cmp::Ordering;
use std::fs;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};

use crate::detect::{detect_format_from_bytes, strip_bom, InputFormat};
use crate::error::{Error, Result};
use crate::model::{BoundingBox, TableGrid};

use super::{DocumentSource, FoundTable, PageSource, TableSettings, Word};

/// Vertical distance within which words share a text line.
const LINE_TOLERANCE: f32 = 3.0;

/// Advance per character used by the synthetic line builder.
const BUILDER_CHAR_WIDTH: f32 = 5.0;

/// Line height used by the synthetic line builder.
const BUILDER_LINE_HEIGHT: f32 = 10.0;

/// A pre-detected table in a dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutTable {
    /// Region corners
    pub bbox: BoundingBox,

    /// Cell text, row by row
    #[serde(default)]
    pub rows: TableGrid,
}

/// One page of an extractor dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutPage {
    /// Page number (1-indexed); 0 means "use the position in the document"
    #[serde(default)]
    pub number: u32,

    /// Page width
    pub width: f32,

    /// Page height
    pub height: f32,

    /// Positioned words in extraction order
    #[serde(default)]
    pub words: Vec<Word>,

    /// Table regions in detection order
    #[serde(default)]
    pub tables: Vec<LayoutTable>,

    /// Number of embedded images
    #[serde(default)]
    pub images: usize,
}

impl LayoutPage {
    /// Create an empty page.
    pub fn new(number: u32, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            words: Vec::new(),
            tables: Vec::new(),
            images: 0,
        }
    }

    /// Create an empty A4 page.
    pub fn a4(number: u32) -> Self {
        Self::new(number, 595.0, 842.0)
    }

    /// Add a word.
    pub fn add_word(&mut self, word: Word) {
        self.words.push(word);
    }

    /// Lay out a line of whitespace-separated words starting at `(x, top)`.
    ///
    /// Every character advances by a fixed width, which is enough to build
    /// synthetic pages for tests and benchmarks.
    pub fn with_text_line(mut self, x: f32, top: f32, text: &str) -> Self {
        let mut cursor = x;
        for token in text.split_whitespace() {
            let width = token.chars().count() as f32 * BUILDER_CHAR_WIDTH;
            self.words.push(Word::new(
                token,
                cursor,
                top,
                cursor + width,
                top + BUILDER_LINE_HEIGHT,
            ));
            cursor += width + BUILDER_CHAR_WIDTH;
        }
        self
    }

    /// Add a table region.
    pub fn with_table(mut self, bbox: BoundingBox, rows: TableGrid) -> Self {
        self.tables.push(LayoutTable { bbox, rows });
        self
    }

    /// Set the embedded image count.
    pub fn with_images(mut self, count: usize) -> Self {
        self.images = count;
        self
    }

    /// Words lying entirely inside `bbox`, grouped into lines.
    fn lines_within(&self, bbox: BoundingBox) -> Vec<Vec<&Word>> {
        let mut words: Vec<&Word> = self
            .words
            .iter()
            .filter(|w| bbox.contains(&w.bbox()))
            .collect();

        words.sort_by(|a, b| {
            a.top
                .partial_cmp(&b.top)
                .unwrap_or(Ordering::Equal)
                .then(a.x0.partial_cmp(&b.x0).unwrap_or(Ordering::Equal))
        });

        let mut lines: Vec<Vec<&Word>> = Vec::new();
        let mut current: Vec<&Word> = Vec::new();
        let mut current_top: Option<f32> = None;

        for word in words {
            match current_top {
                Some(top) if (word.top - top).abs() <= LINE_TOLERANCE => current.push(word),
                _ => {
                    if !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                    }
                    current_top = Some(word.top);
                    current.push(word);
                }
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }

        for line in &mut lines {
            line.sort_by(|a, b| a.x0.partial_cmp(&b.x0).unwrap_or(Ordering::Equal));
        }

        lines
    }

    fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(Error::Layout(format!(
                "page {} has invalid width {}",
                self.number, self.width
            )));
        }
        if !(self.height.is_finite() && self.height > 0.0) {
            return Err(Error::Layout(format!(
                "page {} has invalid height {}",
                self.number, self.height
            )));
        }
        Ok(())
    }
}

impl PageSource for LayoutPage {
    fn page_number(&self) -> u32 {
        self.number
    }

    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn extract_text_within(&self, bbox: BoundingBox) -> Result<String> {
        Ok(self
            .lines_within(bbox)
            .iter()
            .map(|line| {
                line.iter()
                    .map(|w| w.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn find_tables(&self, settings: &TableSettings) -> Result<Vec<FoundTable>> {
        log::trace!(
            "page {}: {} pre-detected tables (tolerance {})",
            self.number,
            self.tables.len(),
            settings.intersection_tolerance
        );
        Ok(self
            .tables
            .iter()
            .enumerate()
            .map(|(ordinal, t)| FoundTable {
                ordinal,
                bbox: t.bbox,
            })
            .collect())
    }

    fn extract_table(&self, table: &FoundTable) -> Result<TableGrid> {
        self.tables
            .get(table.ordinal)
            .map(|t| t.rows.clone())
            .ok_or_else(|| {
                Error::TableExtract(format!(
                    "page {} has no table #{}",
                    self.number,
                    table.ordinal + 1
                ))
            })
    }

    fn extract_words(&self) -> Result<Vec<Word>> {
        Ok(self.words.clone())
    }

    fn image_count(&self) -> Result<usize> {
        Ok(self.images)
    }
}

/// A page-geometry document loaded from an extractor dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Pages in document order
    pub pages: Vec<LayoutPage>,
}

impl LayoutDocument {
    /// Create a document from pages. Pages numbered 0 are renumbered by position.
    pub fn new(pages: Vec<LayoutPage>) -> Self {
        let mut doc = Self { pages };
        doc.assign_page_numbers();
        doc
    }

    /// Load a dump from a file (plain or gzip-compressed JSON).
    ///
    /// # Example
    ///
    /// ```no_run
    /// use unexam::source::LayoutDocument;
    ///
    /// let doc = LayoutDocument::open("exam.layout.json").unwrap();
    /// println!("pages: {}", doc.pages.len());
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Load a dump from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc: LayoutDocument = match detect_format_from_bytes(data)? {
            InputFormat::LayoutJson => serde_json::from_slice(strip_bom(data))?,
            InputFormat::LayoutJsonGzip => {
                let mut json = Vec::new();
                GzDecoder::new(data).read_to_end(&mut json)?;
                // Reject e.g. a gzipped PDF before handing it to serde.
                detect_format_from_bytes(&json)?;
                serde_json::from_slice(strip_bom(&json))?
            }
        };

        for page in &doc.pages {
            page.validate()?;
        }

        Ok(Self::new(doc.pages))
    }

    /// Load a dump from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, number: u32) -> Result<&LayoutPage> {
        self.pages
            .iter()
            .find(|p| p.number == number)
            .ok_or(Error::PageOutOfRange(number, self.pages.len() as u32))
    }

    fn assign_page_numbers(&mut self) {
        for (i, page) in self.pages.iter_mut().enumerate() {
            if page.number == 0 {
                page.number = i as u32 + 1;
            }
        }
    }
}

impl DocumentSource for LayoutDocument {
    type Page = LayoutPage;

    fn pages(&self) -> &[LayoutPage] {
        &self.pages
    }
}
