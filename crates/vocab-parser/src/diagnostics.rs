//! Diagnostic value types.
//!
//! Parse problems are values attached to the AST, never `Err`. The types here
//! serialize in the LSP wire shape (zero-based positions, numeric severity)
//! so upper layers can embed them in protocol payloads directly.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// Zero-based line / column pair, columns counted in runes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

/// Half-open span between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Span `[start, end)` on a single line
    pub fn on_line(line: u32, start: u32, end: u32) -> Self {
        Range {
            start: Position { line, character: start },
            end: Position { line, character: end },
        }
    }
}

/// LSP diagnostic severity, serialized as its numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

impl Severity {
    pub fn code(self) -> u8 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Information => 3,
            Severity::Hint => 4,
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            1 => Ok(Severity::Error),
            2 => Ok(Severity::Warning),
            3 => Ok(Severity::Information),
            4 => Ok(Severity::Hint),
            other => Err(de::Error::custom(format!("invalid severity code {other}"))),
        }
    }
}

/// One diagnostic: a span, a severity, and a message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, line: u32, start: u32, end: u32) -> Self {
        Diagnostic { range: Range::on_line(line, start, end), severity, message: message.into() }
    }

    pub fn error(message: impl Into<String>, line: u32, start: u32, end: u32) -> Self {
        Diagnostic::new(Severity::Error, message, line, start, end)
    }

    pub fn warning(message: impl Into<String>, line: u32, start: u32, end: u32) -> Self {
        Diagnostic::new(Severity::Warning, message, line, start, end)
    }
}

/// A date line failed calendar validation
pub const MALFORMED_DATE: &str = "Malformed date";
/// Content appeared before any date line
pub const EXPECT_DATE_SECTION: &str = "Expect a date section here.";
/// Prose appeared in a section that has no words line yet
pub const EXPECT_VOCAB_SECTION: &str = "Expect a vocabulary section before free text.";
/// The language tag after `>` / `>>` is missing or not `(it)` / `(de)`
pub const UNRECOGNIZED_LANGUAGE: &str =
    "Unrecognized language identifier. Specify either (it) or (de)";
/// The specifier after a word did not parse as an integer grade
pub const INVALID_SCORE: &str = "Score must be a number";
/// The same word appears twice in one words line
pub const DUPLICATE_TOKEN: &str = "This word already appears in this section";
