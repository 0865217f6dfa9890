//! Section-oriented AST for `.vocab` documents.
//!
//! Sections are plain owned values: a [`VocabAst`] owns its sections, which
//! own their words. The index layer re-associates words with their owning
//! section through `Arc` handles when it builds twigs, so nothing here holds
//! back-pointers.

use crate::diagnostics::Diagnostic;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The two languages the format recognizes, plus the fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Italian,
    German,
    Unrecognized,
}

impl Language {
    /// The tag written in the source, empty for `Unrecognized`
    pub fn tag(self) -> &'static str {
        match self {
            Language::Italian => "it",
            Language::German => "de",
            Language::Unrecognized => "",
        }
    }
}

/// One word occurrence as written in the source
#[derive(Debug, Clone, PartialEq)]
pub struct Word {
    /// The word as written, with its article if any
    pub text: String,
    /// Zero-based line
    pub line: u32,
    /// Starting column of the text, in runes
    pub start: u32,
    /// Ending column (exclusive); for backtick literals the span covers the
    /// backticks
    pub end: u32,
    /// True iff the word was wrapped in backticks
    pub literally: bool,
    /// Raw SuperMemo-2 grade parsed after the word, default 0. Clamping to
    /// `0..=5` happens when the word enters the index.
    pub grade: i32,
}

impl Word {
    /// Lowercased text. Richer lemmatization hooks in at the index layer.
    pub fn normalized_text(&self) -> String {
        self.text.to_lowercase()
    }
}

/// One `>` or `>>` line
#[derive(Debug, Clone, PartialEq)]
pub struct WordsSection {
    pub words: Vec<Word>,
    pub language: Language,
    /// True iff introduced by `>>`
    pub reviewed: bool,
    pub line: u32,
}

impl WordsSection {
    pub fn new(language: Language, reviewed: bool, line: u32) -> Self {
        WordsSection { words: Vec::new(), language, reviewed, line }
    }
}

/// The `dd/mm/yyyy` line opening a section
#[derive(Debug, Clone, PartialEq)]
pub struct DateSection {
    /// The literal text as written
    pub text: String,
    /// Local-midnight day, `None` when the text failed calendar validation
    pub time: Option<NaiveDate>,
    pub line: u32,
    pub start: u32,
    pub end: u32,
}

/// A line of free prose inside a section
#[derive(Debug, Clone, PartialEq)]
pub struct UtteranceSection {
    pub text: String,
    pub line: u32,
    pub start: u32,
    pub end: u32,
}

/// One dated block: a date line, its words lines, and any utterances
#[derive(Debug, Clone, PartialEq)]
pub struct VocabularySection {
    pub uri: String,
    /// `None` only for sections synthesized around a parse error
    pub date: Option<DateSection>,
    pub new_words: Vec<WordsSection>,
    pub reviewed_words: Vec<WordsSection>,
    pub utterances: Vec<UtteranceSection>,
    /// Parse-time diagnostics recorded while this section was current
    pub diagnostics: Vec<Diagnostic>,
}

impl VocabularySection {
    pub fn new(uri: impl Into<String>) -> Self {
        VocabularySection {
            uri: uri.into(),
            date: None,
            new_words: Vec::new(),
            reviewed_words: Vec::new(),
            utterances: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Identity key `uri :: date_text :: date_line`, used to deduplicate
    /// twigs across grafts. Sections without a date never reach the index.
    pub fn identity(&self) -> String {
        match &self.date {
            Some(date) => format!("{}::{}::{}", self.uri, date.text, date.line),
            None => format!("{}::::", self.uri),
        }
    }

    /// New-words lines followed by reviewed-words lines
    pub fn words_sections(&self) -> impl Iterator<Item = &WordsSection> {
        self.new_words.iter().chain(self.reviewed_words.iter())
    }

    pub fn has_words_section(&self) -> bool {
        !self.new_words.is_empty() || !self.reviewed_words.is_empty()
    }
}

/// Every section of one document, in source order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VocabAst {
    pub uri: String,
    pub sections: Vec<VocabularySection>,
}

impl VocabAst {
    pub fn new(uri: impl Into<String>) -> Self {
        VocabAst { uri: uri.into(), sections: Vec::new() }
    }

    /// All parse diagnostics of the document, in section order
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.sections.iter().flat_map(|s| s.diagnostics.iter())
    }
}
