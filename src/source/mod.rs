//! Page-geometry sources.
//!
//! The reconstruction pipeline never parses PDF bytes itself. It consumes pages
//! through [`PageSource`], which mirrors what a positional extractor offers: text
//! inside a rectangle, line-based table detection, and positioned words.
//! [`LayoutDocument`] is the bundled implementation backed by an extractor dump.

mod layout;

pub use layout::{LayoutDocument, LayoutPage, LayoutTable};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{BoundingBox, TableGrid};

/// How table boundaries are found along one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStrategy {
    /// Ruling lines drawn on the page
    #[default]
    Lines,
    /// Alignment of text
    Text,
}

/// Table detection settings handed to the extractor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TableSettings {
    /// Strategy for vertical boundaries
    pub vertical_strategy: TableStrategy,

    /// Strategy for horizontal boundaries
    pub horizontal_strategy: TableStrategy,

    /// Distance within which ruling lines are considered intersecting
    pub intersection_tolerance: f32,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            vertical_strategy: TableStrategy::Lines,
            horizontal_strategy: TableStrategy::Lines,
            // Bridges near-touching rulings without merging neighbouring tables.
            intersection_tolerance: 3.0,
        }
    }
}

/// A table found on a page, before its cells are read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoundTable {
    /// Detection order on the page (0-indexed)
    pub ordinal: usize,

    /// Region corners
    pub bbox: BoundingBox,
}

/// A positioned word token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// Token text
    pub text: String,

    /// Left edge
    pub x0: f32,

    /// Right edge
    #[serde(default)]
    pub x1: f32,

    /// Top edge
    pub top: f32,

    /// Bottom edge
    #[serde(default)]
    pub bottom: f32,
}

impl Word {
    /// Create a word from its box.
    pub fn new(text: impl Into<String>, x0: f32, top: f32, x1: f32, bottom: f32) -> Self {
        Self {
            text: text.into(),
            x0,
            x1,
            top,
            bottom,
        }
    }

    /// The word's bounding box. Missing right/bottom edges collapse onto the origin.
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(
            self.x0,
            self.top,
            self.x1.max(self.x0),
            self.bottom.max(self.top),
        )
    }
}

/// One page as seen by an external page-geometry extractor.
pub trait PageSource {
    /// Page number (1-indexed).
    fn page_number(&self) -> u32;

    /// Page width in extractor units.
    fn width(&self) -> f32;

    /// Page height in extractor units.
    fn height(&self) -> f32;

    /// Extract the text of everything inside `bbox`, in reading order.
    fn extract_text_within(&self, bbox: BoundingBox) -> Result<String>;

    /// Detect table regions.
    fn find_tables(&self, settings: &TableSettings) -> Result<Vec<FoundTable>>;

    /// Read the cells of a table returned by [`find_tables`](Self::find_tables).
    fn extract_table(&self, table: &FoundTable) -> Result<TableGrid>;

    /// Extract positioned words in extraction order (top-to-bottom, left-to-right).
    fn extract_words(&self) -> Result<Vec<Word>>;

    /// Number of embedded images on the page.
    fn image_count(&self) -> Result<usize> {
        Ok(0)
    }
}

/// A document as an ordered list of pages.
pub trait DocumentSource {
    /// Page type
    type Page: PageSource;

    /// Pages in document order.
    fn pages(&self) -> &[Self::Page];

    /// Number of pages.
    fn page_count(&self) -> u32 {
        self.pages().len() as u32
    }
}
