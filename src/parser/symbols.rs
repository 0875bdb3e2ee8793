//! Circled choice symbol location.

use crate::model::{Point, CHOICE_COUNT};
use crate::source::PageSource;

/// The four circled choice symbols, in slot order.
pub const CHOICE_SYMBOLS: [char; CHOICE_COUNT] = ['①', '②', '③', '④'];

/// Slot (0-indexed) of a choice symbol, if `c` is one.
pub fn symbol_slot(c: char) -> Option<usize> {
    CHOICE_SYMBOLS.iter().position(|&s| s == c)
}

/// First on-page position of each choice symbol, in the order the symbols were
/// found.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChoiceSymbolPositions {
    found: [Option<(usize, Point)>; CHOICE_COUNT],
    len: usize,
}

impl ChoiceSymbolPositions {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a position unless the slot already has one.
    ///
    /// Returns `true` when the position was kept.
    pub fn record_first(&mut self, slot: usize, position: Point) -> bool {
        if slot >= CHOICE_COUNT || self.get(slot).is_some() {
            return false;
        }
        self.found[self.len] = Some((slot, position));
        self.len += 1;
        true
    }

    /// Position of a slot (0-indexed).
    pub fn get(&self, slot: usize) -> Option<Point> {
        self.iter().find(|(s, _)| *s == slot).map(|(_, p)| p)
    }

    /// Known positions with their slot, in the order they were recorded.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Point)> + '_ {
        self.found.iter().flatten().copied()
    }

    /// Number of symbols found.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no symbol was found.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Find the first position of each choice symbol on a page.
///
/// Only words consisting of exactly one symbol count. Later occurrences, such as a
/// symbol quoted in an explanation, are ignored; this relies on the extractor
/// yielding words top-to-bottom, left-to-right. A word-extraction fault yields an
/// empty map.
pub fn find_choice_symbols<P: PageSource + ?Sized>(page: &P) -> ChoiceSymbolPositions {
    let mut positions = ChoiceSymbolPositions::new();

    let words = match page.extract_words() {
        Ok(words) => words,
        Err(e) => {
            log::warn!(
                "Failed to locate choice symbols on page {}: {}",
                page.page_number(),
                e
            );
            return positions;
        }
    };

    for word in &words {
        let mut chars = word.text.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            continue;
        };
        if let Some(slot) = symbol_slot(c) {
            if positions.record_first(slot, Point::new(word.x0, word.top)) {
                log::debug!(
                    "  choice {} at ({:.0}, {:.0})",
                    CHOICE_SYMBOLS[slot],
                    word.x0,
                    word.top
                );
            }
        }
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{LayoutPage, Word};

    #[test]
    fn test_first_occurrence_wins() {
        let mut page = LayoutPage::a4(1);
        page.add_word(Word::new("①", 40.0, 100.0, 48.0, 110.0));
        page.add_word(Word::new("②", 300.0, 100.0, 308.0, 110.0));
        page.add_word(Word::new("①", 40.0, 500.0, 48.0, 510.0));

        let positions = find_choice_symbols(&page);
        assert_eq!(positions.len(), 2);
        assert_eq!(positions.get(0), Some(Point::new(40.0, 100.0)));
        assert_eq!(positions.get(1), Some(Point::new(300.0, 100.0)));
        assert_eq!(positions.get(2), None);
    }

    #[test]
    fn test_positions_keep_page_order() {
        let mut page = LayoutPage::a4(1);
        page.add_word(Word::new("③", 40.0, 100.0, 48.0, 110.0));
        page.add_word(Word::new("①", 40.0, 200.0, 48.0, 210.0));
        page.add_word(Word::new("③", 40.0, 300.0, 48.0, 310.0));

        let positions = find_choice_symbols(&page);
        let slots: Vec<usize> = positions.iter().map(|(slot, _)| slot).collect();
        assert_eq!(slots, vec![2, 0]);
        assert_eq!(positions.get(2), Some(Point::new(40.0, 100.0)));
    }

    #[test]
    fn test_record_rejects_unknown_slot() {
        let mut positions = ChoiceSymbolPositions::new();
        assert!(!positions.record_first(CHOICE_COUNT, Point::new(0.0, 0.0)));
        assert!(positions.is_empty());
    }

    #[test]
    fn test_symbols_inside_words_are_ignored() {
        let page = LayoutPage::a4(1).with_text_line(40.0, 100.0, "①선택1 ③");
        let positions = find_choice_symbols(&page);
        assert_eq!(positions.len(), 1);
        assert!(positions.get(2).is_some());
    }

    #[test]
    fn test_missing_symbols_give_empty_map() {
        let page = LayoutPage::a4(1).with_text_line(40.0, 100.0, "no symbols here");
        assert!(find_choice_symbols(&page).is_empty());
    }

    #[test]
    fn test_symbol_slot() {
        assert_eq!(symbol_slot('①'), Some(0));
        assert_eq!(symbol_slot('④'), Some(3));
        assert_eq!(symbol_slot('⑤'), None);
    }
}
