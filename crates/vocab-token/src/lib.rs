//! Token definitions for the `.vocab` format.
//!
//! This crate provides the shared token definitions used by the scanner and
//! the parser.

use std::sync::Arc;

/// Token produced by the scanner and consumed by the parser.
///
/// Stores the token kind, the scanned text, the half-open column span on the
/// token's line, and the zero-based line itself. The text is kept in an
/// `Arc<str>` so buffering and lookahead can clone tokens cheaply.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token classification for parser decision making
    pub kind: TokenKind,
    /// Scanned text payload (inner content for literals and specifiers)
    pub text: Arc<str>,
    /// Starting column on the line, counted in runes
    pub start: u32,
    /// Ending column (exclusive)
    pub end: u32,
    /// Zero-based line the token starts on
    pub line: u32,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, text: impl Into<Arc<str>>, start: u32, end: u32, line: u32) -> Self {
        Token { kind, text: text.into(), start, end, line }
    }

    /// Number of columns the token covers
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if the token covers no columns
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Token classification for `.vocab` parsing.
///
/// The set is intentionally small: the format is line-oriented and most
/// constructs are single characters. Anything the scanner cannot classify
/// degrades to `Text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// New-words marker: `>`
    GreaterThan,
    /// Reviewed-words marker: `>>`
    DoubleGreaterThan,
    /// Word separator: `,`
    Comma,
    /// Bare slash outside a date: `/`
    Slash,
    /// Line break (`\n`, `\r`, U+2028, U+2029)
    LineBreak,
    /// One single-line whitespace rune
    ///
    /// Whitespace is forwarded rather than skipped: the scanner cannot know
    /// whether it is inside an utterance, only the parser can.
    Whitespace,
    /// End of input
    Eof,
    /// Date line candidate: `dd/mm/yyyy`
    DateExpression,
    /// Backtick-quoted word, payload is the inner text
    WordLiteral,
    /// Parenthesized specifier, payload is the inner text: `(it)`, `(de)`, `(4)`
    SemanticSpecifier,
    /// Comment marker `|`; the body up to the line break is discarded
    CommentTrivia,
    /// Letter runs and any rune that matches nothing above
    Text,
    /// Unrecognized token (unused by the scanner, kept for parser defaults)
    Unknown,
}
