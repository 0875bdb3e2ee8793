//! Table region types.

use super::BoundingBox;
use serde::{Deserialize, Serialize};

/// Cell text of a table, row by row. `None` marks a cell the extractor left empty.
pub type TableGrid = Vec<Vec<Option<String>>>;

/// A detected table region on a page.
///
/// Regions are created once by the table locator and never mutated afterwards.
/// Questions that use a region receive a copy of its [`data`](Self::data).
///
/// The flattened position fields are output only; deserializing recomputes them
/// from `bbox`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredTableRegion")]
pub struct TableRegion {
    /// Page number (1-indexed)
    pub page: u32,

    /// Detection order on the page (1-indexed)
    pub index: u32,

    /// Cell text
    pub data: TableGrid,

    /// Region corners `[x0, y0, x1, y1]`
    pub bbox: BoundingBox,

    /// Left edge
    pub x: f32,

    /// Top edge
    pub y: f32,

    /// Region width
    pub width: f32,

    /// Region height
    pub height: f32,
}

#[derive(Deserialize)]
struct StoredTableRegion {
    page: u32,
    index: u32,
    data: TableGrid,
    bbox: BoundingBox,
}

impl From<StoredTableRegion> for TableRegion {
    fn from(stored: StoredTableRegion) -> Self {
        TableRegion::new(stored.page, stored.index, stored.bbox, stored.data)
    }
}

impl TableRegion {
    /// Create a region; the flattened position fields are derived from `bbox`.
    pub fn new(page: u32, index: u32, bbox: BoundingBox, data: TableGrid) -> Self {
        Self {
            page,
            index,
            data,
            bbox,
            x: bbox.x(),
            y: bbox.y(),
            width: bbox.width(),
            height: bbox.height(),
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Number of columns (based on the widest row).
    pub fn column_count(&self) -> usize {
        self.data.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// Check if the region carries no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get row texts with empty cells skipped and the rest joined by a space.
    pub fn row_texts(&self) -> Vec<String> {
        self.data
            .iter()
            .map(|row| {
                row.iter()
                    .flatten()
                    .filter(|cell| !cell.is_empty())
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}
