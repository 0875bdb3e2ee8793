//! Two-column text extraction.
//!
//! Extracting a two-column page in one pass interleaves unrelated lines that
//! happen to share a vertical position. Reading each half on its own keeps the
//! printed reading order.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::BoundingBox;
use crate::source::PageSource;

use super::options::ErrorMode;

/// Column text of one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnText {
    /// Page number (1-indexed)
    pub page: u32,

    /// Left column, then a newline and the right column when it is non-empty
    pub full_text: String,

    /// Left column text
    pub left_text: String,

    /// Right column text
    pub right_text: String,
}

/// Extract the left and right column text of a page.
///
/// The page is split at half its width into two non-overlapping rectangles.
/// In lenient mode a column whose extraction fails is logged and treated as empty.
pub fn extract_columns<P: PageSource + ?Sized>(page: &P, mode: ErrorMode) -> Result<ColumnText> {
    let page_number = page.page_number();
    let full_box = BoundingBox::new(0.0, 0.0, page.width(), page.height());
    let (left_box, right_box) = full_box.split_at_x(page.width() / 2.0);

    let left_text = read_column(page, left_box, "left", mode)?;
    let right_text = read_column(page, right_box, "right", mode)?;

    let mut full_text = left_text.clone();
    if !right_text.is_empty() {
        full_text.push('\n');
        full_text.push_str(&right_text);
    }

    log::debug!(
        "page {}: columns extracted ({} + {} bytes)",
        page_number,
        left_text.len(),
        right_text.len()
    );

    Ok(ColumnText {
        page: page_number,
        full_text,
        left_text,
        right_text,
    })
}

fn read_column<P: PageSource + ?Sized>(
    page: &P,
    bbox: BoundingBox,
    side: &str,
    mode: ErrorMode,
) -> Result<String> {
    match page.extract_text_within(bbox) {
        Ok(text) => Ok(text),
        Err(e) if mode == ErrorMode::Lenient => {
            log::warn!(
                "Failed to extract {} column of page {}: {}",
                side,
                page.page_number(),
                e
            );
            Ok(String::new())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LayoutPage;

    #[test]
    fn test_columns_are_read_independently() {
        let page = LayoutPage::new(1, 600.0, 800.0)
            .with_text_line(20.0, 30.0, "1. 왼쪽 첫 줄")
            .with_text_line(320.0, 30.0, "3. 오른쪽 첫 줄")
            .with_text_line(20.0, 50.0, "왼쪽 둘째 줄");

        let columns = extract_columns(&page, ErrorMode::Lenient).unwrap();
        assert_eq!(columns.page, 1);
        assert_eq!(columns.left_text, "1. 왼쪽 첫 줄\n왼쪽 둘째 줄");
        assert_eq!(columns.right_text, "3. 오른쪽 첫 줄");
        assert_eq!(
            columns.full_text,
            "1. 왼쪽 첫 줄\n왼쪽 둘째 줄\n3. 오른쪽 첫 줄"
        );
    }

    #[test]
    fn test_empty_page_has_empty_full_text() {
        let page = LayoutPage::new(2, 600.0, 800.0);
        let columns = extract_columns(&page, ErrorMode::Strict).unwrap();
        assert_eq!(columns.full_text, "");
        assert_eq!(columns.page, 2);
    }

    #[test]
    fn test_right_only_page_starts_with_newline() {
        let page = LayoutPage::new(1, 600.0, 800.0).with_text_line(320.0, 30.0, "오른쪽");
        let columns = extract_columns(&page, ErrorMode::Lenient).unwrap();
        assert_eq!(columns.full_text, "\n오른쪽");
    }
}
