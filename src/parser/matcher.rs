//! Table-to-choice matching.
//!
//! When a question's four choices are tables, the extractor reports four (or more)
//! disconnected regions. Two strategies order them into choice slots:
//!
//! - **Symbol proximity**, when circled choice symbols were located: every table
//!   goes to its nearest eligible symbol.
//! - **Positional fallback**, otherwise: the regions are read as a 2×2 grid,
//!   `① ②` over `③ ④`.
//!
//! Symbol matching is a stable greedy pass, not a global minimum-cost assignment.
//! Two tables at similar distances from two symbols can both pick the same one,
//! in which case the farther table is dropped.

use std::cmp::Ordering;

use crate::model::{TableRegion, CHOICE_COUNT};

use super::symbols::{ChoiceSymbolPositions, CHOICE_SYMBOLS};

/// Weight applied to vertical offsets when measuring table-symbol distance.
pub const VERTICAL_WEIGHT: f32 = 2.0;

/// How far above its symbol a table's top edge may sit and still match.
pub const SYMBOL_TOLERANCE: f32 = 10.0;

/// Regions needed before the positional fallback assumes a 2×2 grid.
const GRID_SIZE: usize = 4;

/// Order tables into choice slots.
///
/// Uses symbol proximity when any symbol position is known, otherwise the
/// positional fallback. Symbol matching always yields four slots; the fallback
/// yields every table, in grid order.
pub fn match_tables_to_choices<'a>(
    tables: &[&'a TableRegion],
    positions: &ChoiceSymbolPositions,
) -> Vec<Option<&'a TableRegion>> {
    if positions.is_empty() {
        log::debug!("  no choice symbols found, ordering tables by position");
        return sort_tables_by_position(tables)
            .into_iter()
            .map(Some)
            .collect();
    }

    match_by_symbols(tables, positions).to_vec()
}

/// Assign each table to its nearest eligible choice symbol.
///
/// A table is eligible for a symbol when its top edge is no more than
/// [`SYMBOL_TOLERANCE`] above the symbol. Distance is
/// `sqrt(dx² + (2·dy)²)`. A table equidistant from two symbols takes the one
/// found first on the page. When two tables pick the same symbol, the strictly
/// closer one keeps it.
pub fn match_by_symbols<'a>(
    tables: &[&'a TableRegion],
    positions: &ChoiceSymbolPositions,
) -> [Option<&'a TableRegion>; CHOICE_COUNT] {
    let mut matched: [Option<(&'a TableRegion, f32)>; CHOICE_COUNT] = [None; CHOICE_COUNT];

    for &table in tables {
        let origin = table.bbox.origin();
        let top = table.bbox.y();

        let closest = positions
            .iter()
            .filter(|(_, symbol)| top >= symbol.y - SYMBOL_TOLERANCE)
            .map(|(slot, symbol)| (slot, origin.weighted_distance(symbol, VERTICAL_WEIGHT)))
            .fold(None, |best: Option<(usize, f32)>, (slot, distance)| match best {
                Some((_, d)) if distance >= d => best,
                _ => Some((slot, distance)),
            });

        let Some((slot, distance)) = closest else {
            log::debug!(
                "  table {} on page {} has no symbol above it",
                table.index,
                table.page
            );
            continue;
        };

        match matched[slot] {
            Some((_, previous)) if distance >= previous => {
                log::debug!(
                    "  table {} loses {} (distance {:.0} >= {:.0})",
                    table.index,
                    CHOICE_SYMBOLS[slot],
                    distance,
                    previous
                );
            }
            _ => {
                log::debug!(
                    "  table {} -> {} (distance {:.0})",
                    table.index,
                    CHOICE_SYMBOLS[slot],
                    distance
                );
                matched[slot] = Some((table, distance));
            }
        }
    }

    matched.map(|entry| entry.map(|(table, _)| table))
}

/// Order tables by position.
///
/// Fewer than four tables are sorted by `(y, x)`. Otherwise the row boundary is
/// the midpoint between the second and third smallest `y`; tables above it form
/// the top row, the rest the bottom row, and each row is sorted by `x`.
pub fn sort_tables_by_position<'a>(tables: &[&'a TableRegion]) -> Vec<&'a TableRegion> {
    if tables.len() < GRID_SIZE {
        let mut sorted = tables.to_vec();
        sorted.sort_by(|a, b| {
            cmp_f32(a.bbox.y(), b.bbox.y()).then(cmp_f32(a.bbox.x(), b.bbox.x()))
        });
        return sorted;
    }

    let mut by_y = tables.to_vec();
    by_y.sort_by(|a, b| cmp_f32(a.bbox.y(), b.bbox.y()));
    let mid_y = (by_y[1].bbox.y() + by_y[2].bbox.y()) / 2.0;

    let (mut top, mut bottom): (Vec<&TableRegion>, Vec<&TableRegion>) =
        tables.iter().copied().partition(|t| t.bbox.y() < mid_y);
    top.sort_by(|a, b| cmp_f32(a.bbox.x(), b.bbox.x()));
    bottom.sort_by(|a, b| cmp_f32(a.bbox.x(), b.bbox.x()));

    top.extend(bottom);
    top
}

fn cmp_f32(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
