//! Question parsing.
//!
//! Page text is tokenized and split into blocks. A new block begins at the start
//! of the page and at every line break that is directly followed by a number
//! marker and whitespace. Each block is then parsed with a small recursive-descent
//! grammar:
//!
//! ```text
//! block   := ws* NUMBER_MARKER ws+ body
//! body    := stem (CHOICE_SYMBOL choice)*
//! stem    := <tokens up to the first choice symbol>
//! choice  := <tokens up to the next choice symbol>
//! ```
//!
//! Blocks that do not fit the grammar, or whose body is blank, are discarded.

use crate::model::Question;

use super::columns::ColumnText;
use super::lexer::{tokenize, Lexeme, Token};
use super::normalize::TextNormalizer;

/// Parses questions out of page text.
pub struct QuestionParser {
    normalizer: TextNormalizer,
}

impl QuestionParser {
    /// Create a parser.
    pub fn new(normalize_unicode: bool) -> Self {
        Self {
            normalizer: TextNormalizer::new(normalize_unicode),
        }
    }

    /// Parse every page, then order the questions by number.
    ///
    /// When a number occurs more than once, the first occurrence in page order
    /// is kept.
    pub fn parse_pages(&self, pages: &[ColumnText]) -> Vec<Question> {
        let mut questions: Vec<Question> = pages
            .iter()
            .flat_map(|page| self.parse_page(page.page, &page.full_text))
            .collect();

        questions.sort_by_key(|q| q.number);
        let before = questions.len();
        questions.dedup_by_key(|q| q.number);
        if questions.len() < before {
            log::debug!("Dropped {} duplicate question numbers", before - questions.len());
        }

        log::info!("Parsed {} questions", questions.len());
        questions
    }

    /// Parse the questions of a single page, in text order.
    pub fn parse_page(&self, page: u32, text: &str) -> Vec<Question> {
        let source = self.normalizer.prepare_page(text);
        let tokens = tokenize(&source);

        let questions: Vec<Question> = split_blocks(&tokens)
            .into_iter()
            .filter_map(|block| {
                BlockParser::new(&source, block, &self.normalizer).parse(page)
            })
            .collect();

        log::debug!("page {}: {} questions", page, questions.len());
        questions
    }
}

impl Default for QuestionParser {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Parse every page with default settings.
pub fn parse_questions(pages: &[ColumnText]) -> Vec<Question> {
    QuestionParser::default().parse_pages(pages)
}

/// Split a token stream into question blocks.
///
/// The line break that starts a block belongs to neither neighbour.
fn split_blocks(tokens: &[Lexeme]) -> Vec<&[Lexeme]> {
    let mut blocks = Vec::new();
    let mut start = 0;

    for i in 0..tokens.len() {
        if tokens[i].kind == Token::Newline && starts_question(&tokens[i + 1..]) {
            blocks.push(&tokens[start..i]);
            start = i + 1;
        }
    }
    blocks.push(&tokens[start..]);

    blocks
}

fn starts_question(tokens: &[Lexeme]) -> bool {
    matches!(
        tokens,
        [marker, next, ..] if marker.kind == Token::NumberMarker && next.kind.is_whitespace()
    )
}

/// Recursive-descent parser over the tokens of one block.
struct BlockParser<'a> {
    source: &'a str,
    tokens: &'a [Lexeme],
    pos: usize,
    normalizer: &'a TextNormalizer,
}

impl<'a> BlockParser<'a> {
    fn new(source: &'a str, tokens: &'a [Lexeme], normalizer: &'a TextNormalizer) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            normalizer,
        }
    }

    fn peek(&self) -> Option<&'a Lexeme> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'a Lexeme> {
        let lexeme = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(lexeme)
    }

    /// Skip whitespace, returning how many tokens were skipped.
    fn skip_whitespace(&mut self) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(|l| l.kind.is_whitespace()) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn parse(mut self, page: u32) -> Option<Question> {
        self.skip_whitespace();
        let number = self.parse_marker()?;
        if self.skip_whitespace() == 0 {
            return None;
        }

        let (stem, choices) = self.parse_body()?;
        Some(Question::new(number, page, stem, choices))
    }

    /// `NUMBER_MARKER`, yielding the question number.
    fn parse_marker(&mut self) -> Option<u32> {
        let marker = self.advance()?;
        if marker.kind != Token::NumberMarker {
            return None;
        }
        marker.text(self.source).trim_end_matches('.').parse().ok()
    }

    /// `stem (CHOICE_SYMBOL choice)*`. Returns `None` for a blank body.
    fn parse_body(&mut self) -> Option<(String, Vec<String>)> {
        let rest = &self.tokens[self.pos..];
        if rest.iter().all(|l| l.kind.is_whitespace()) {
            return None;
        }

        let stem = self.parse_segment();
        let mut choices = Vec::new();
        while let Some(symbol) = self.advance() {
            debug_assert_eq!(symbol.kind, Token::ChoiceSymbol);
            choices.push(self.parse_segment());
        }

        Some((stem, choices))
    }

    /// Tokens up to the next choice symbol, cleaned.
    fn parse_segment(&mut self) -> String {
        let start = self.pos;
        while self.peek().is_some_and(|l| l.kind != Token::ChoiceSymbol) {
            self.pos += 1;
        }

        let text = match &self.tokens[start..self.pos] {
            [first, .., last] => &self.source[first.span.start..last.span.end],
            [only] => only.text(self.source),
            [] => "",
        };
        self.normalizer.clean(text)
    }
}
