//! Text cleanup for extracted question text.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Cleans page text before lexing and question pieces after parsing.
pub struct TextNormalizer {
    normalize_unicode: bool,
    marker_prefix: Regex,
    split_word: Regex,
}

impl TextNormalizer {
    /// Create a normalizer.
    pub fn new(normalize_unicode: bool) -> Self {
        Self {
            normalize_unicode,
            // A whole 1-2 letter word right before "N." is a stray fragment of the
            // neighbouring column.
            marker_prefix: Regex::new(r"[a-z가-힣]{1,2}\s+([0-9]+\.)").unwrap(),
            split_word: Regex::new(r"다\s+양한").unwrap(),
        }
    }

    /// Prepare a page's text for lexing.
    ///
    /// Applies NFC normalization when enabled and replaces short fragments in front
    /// of a question marker with a line break.
    pub fn prepare_page(&self, text: &str) -> String {
        let text: String = if self.normalize_unicode {
            text.nfc().collect()
        } else {
            text.to_string()
        };
        self.split_marker_prefixes(&text)
    }

    /// Replace each fragment that starts a word with a line break, keeping the
    /// marker. Matches are taken left to right and never overlap.
    fn split_marker_prefixes(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        let mut pos = 0;

        while let Some(caps) = self.marker_prefix.captures_at(text, pos) {
            let (Some(whole), Some(marker)) = (caps.get(0), caps.get(1)) else {
                break;
            };

            if starts_word(text, whole.start()) {
                out.push_str(&text[copied..whole.start()]);
                out.push('\n');
                out.push_str(marker.as_str());
                copied = whole.end();
                pos = whole.end();
            } else {
                // Retry from the next character; the fragment must be a whole word.
                pos = whole.start()
                    + text[whole.start()..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
            }
        }

        out.push_str(&text[copied..]);
        out
    }

    /// Clean a stem or choice: rejoin split words, collapse whitespace, trim.
    pub fn clean(&self, text: &str) -> String {
        let joined = self.split_word.replace_all(text, "다양한");
        joined.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Whether a word starts at byte `at`. Circled numerals count as word characters.
fn starts_word(text: &str, at: usize) -> bool {
    text[..at]
        .chars()
        .next_back()
        .map_or(true, |c| !(c.is_alphanumeric() || c == '_'))
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(true)
    }
}
