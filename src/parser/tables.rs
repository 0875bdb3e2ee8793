//! Table region location.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::model::TableRegion;
use crate::source::{PageSource, TableSettings};

use super::options::ErrorMode;

/// Locate the table regions of a page.
///
/// Indices follow detection order starting at 1. Tables whose grid comes back
/// empty are left out but still consume an index. A table that fails to extract
/// is logged and skipped in lenient mode.
pub fn locate_tables<P: PageSource + ?Sized>(
    page: &P,
    settings: &TableSettings,
    mode: ErrorMode,
) -> Result<Vec<TableRegion>> {
    let page_number = page.page_number();

    let found = match page.find_tables(settings) {
        Ok(found) => found,
        Err(e) if mode == ErrorMode::Lenient => {
            log::warn!("Failed to detect tables on page {}: {}", page_number, e);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let mut regions = Vec::with_capacity(found.len());
    for (i, table) in found.iter().enumerate() {
        let index = i as u32 + 1;
        let data = match page.extract_table(table) {
            Ok(data) => data,
            Err(e) if mode == ErrorMode::Lenient => {
                log::warn!(
                    "Failed to extract table {} on page {}: {}",
                    index,
                    page_number,
                    e
                );
                continue;
            }
            Err(e) => return Err(e),
        };

        if data.is_empty() {
            log::debug!("page {}: table {} is empty, skipped", page_number, index);
            continue;
        }

        log::debug!(
            "page {}: table {} at ({:.0}, {:.0})",
            page_number,
            index,
            table.bbox.x(),
            table.bbox.y()
        );
        regions.push(TableRegion::new(page_number, index, table.bbox, data));
    }

    Ok(regions)
}

/// Group table regions by page, keeping detection order within each page.
pub fn group_by_page(tables: &[TableRegion]) -> BTreeMap<u32, Vec<&TableRegion>> {
    let mut by_page: BTreeMap<u32, Vec<&TableRegion>> = BTreeMap::new();
    for table in tables {
        by_page.entry(table.page).or_default().push(table);
    }
    by_page
}
