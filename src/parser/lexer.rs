//! Tokenizer for page text.
//!
//! Page text is cut into a flat token stream that the question parser walks.
//! Every input byte belongs to exactly one token, so slicing the source by token
//! spans reproduces it.

use std::ops::Range;

use logos::Logos;

/// Tokens of page text.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    // Line breaks
    #[token("\n")]
    Newline,

    // Whitespace other than line breaks
    #[regex(r"[ \t\r\x0B\x0C\x{00A0}\x{3000}]+")]
    Space,

    // Question number marker, e.g. "12."
    #[regex(r"[0-9]+\.")]
    NumberMarker,

    #[regex(r"[0-9]+")]
    Digits,

    // Circled choice symbol
    #[regex(r"[①②③④]")]
    ChoiceSymbol,

    // Anything else
    #[regex(r"[^\n \t\r\x0B\x0C\x{00A0}\x{3000}0-9①②③④]+")]
    Text,
}

impl Token {
    /// Check if this token is whitespace (including line breaks)
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Token::Newline | Token::Space)
    }
}

/// A token with its byte span in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: Token,
    pub span: Range<usize>,
}

impl Lexeme {
    /// Source text covered by this token.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.clone()]
    }
}

/// Tokenize page text.
///
/// Bytes the lexer cannot classify are kept as [`Token::Text`].
pub fn tokenize(source: &str) -> Vec<Lexeme> {
    Token::lexer(source)
        .spanned()
        .map(|(result, span)| Lexeme {
            kind: result.unwrap_or(Token::Text),
            span,
        })
        .collect()
}
