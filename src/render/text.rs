//! Plain text rendering of extracted page text.

use crate::parser::ColumnText;

/// Render the column text of every page, each under a `===== 페이지 N =====` banner.
pub fn to_page_text(pages: &[ColumnText]) -> String {
    let mut output = String::new();
    for page in pages {
        output.push_str(&format!("===== 페이지 {} =====\n", page.page));
        output.push_str(&page.full_text);
        output.push_str("\n\n");
    }
    output
}
