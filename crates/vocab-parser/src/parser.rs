//! Recursive-descent parser for `.vocab` documents.
//!
//! One-token lookahead over the scanner stream. Error recovery is per line:
//! recording an error skips everything up to the next line break, so a line
//! carries at most one parse diagnostic per section.

use crate::ast::{
    DateSection, Language, UtteranceSection, VocabAst, VocabularySection, Word, WordsSection,
};
use crate::diagnostics::{
    Diagnostic, DUPLICATE_TOKEN, EXPECT_DATE_SECTION, EXPECT_VOCAB_SECTION, INVALID_SCORE,
    MALFORMED_DATE, UNRECOGNIZED_LANGUAGE,
};
use chrono::NaiveDate;
use vocab_scanner::Scanner;
use vocab_token::{Token, TokenKind};

/// Format of a date line under the calendar
const DATE_FORMAT: &str = "%d/%m/%Y";

pub struct Parser<'a> {
    scanner: Scanner<'a>,
    token: Token,
    ast: VocabAst,
}

impl<'a> Parser<'a> {
    pub fn new(uri: impl Into<String>, text: &'a str) -> Self {
        Parser {
            scanner: Scanner::new(text),
            token: Token::new(TokenKind::Unknown, "", 0, 0, 0),
            ast: VocabAst::new(uri),
        }
    }

    /// Consume the whole document and return its AST with embedded
    /// diagnostics. Parsing never fails.
    pub fn parse(mut self) -> VocabAst {
        loop {
            self.next_token();

            match self.token.kind {
                TokenKind::Eof => break,
                TokenKind::CommentTrivia | TokenKind::LineBreak | TokenKind::Whitespace => {
                    continue;
                }
                TokenKind::DateExpression => {
                    self.start_new_section();
                    self.parse_date();
                }
                TokenKind::GreaterThan | TokenKind::DoubleGreaterThan => {
                    let reviewed = self.token.kind == TokenKind::DoubleGreaterThan;
                    let dated =
                        self.ast.sections.last().is_some_and(|section| section.date.is_some());
                    if !dated {
                        self.start_new_section();
                        self.error_here(EXPECT_DATE_SECTION);
                        continue;
                    }
                    self.parse_words_section(reviewed);
                }
                _ => {
                    if self.ast.sections.is_empty() {
                        self.start_new_section();
                        self.error_here(EXPECT_DATE_SECTION);
                        continue;
                    }
                    if !self.current_section().has_words_section() {
                        self.error_here(EXPECT_VOCAB_SECTION);
                        continue;
                    }
                    self.parse_utterance();
                }
            }
        }
        self.ast
    }

    /// Current token is a `DateExpression`. The section keeps its date even
    /// when calendar validation fails; the failure is a `MalformedDate`
    /// diagnostic and a `None` instant.
    fn parse_date(&mut self) {
        let text = self.token.text.to_string();
        let time = NaiveDate::parse_from_str(&text, DATE_FORMAT).ok();
        let malformed = time.is_none();
        let date = DateSection {
            text,
            time,
            line: self.token.line,
            start: self.token.start,
            end: self.token.end,
        };
        self.current_section_mut().date = Some(date);

        if malformed {
            self.error_here(MALFORMED_DATE);
        }
    }

    /// Current token is `>` or `>>` and the current section has a date.
    fn parse_words_section(&mut self, reviewed: bool) {
        let line = self.token.line;
        let section = WordsSection::new(Language::Unrecognized, reviewed, line);
        if reviewed {
            self.current_section_mut().reviewed_words.push(section);
        } else {
            self.current_section_mut().new_words.push(section);
        }

        self.next_token_not_whitespace();

        if self.token.kind != TokenKind::SemanticSpecifier {
            self.error_here(UNRECOGNIZED_LANGUAGE);
            return;
        }
        let language = match &*self.token.text {
            "it" => Language::Italian,
            "de" => Language::German,
            _ => {
                self.error_here(UNRECOGNIZED_LANGUAGE);
                return;
            }
        };
        self.words_section_mut(reviewed).language = language;

        self.next_token_not_whitespace();
        self.parse_word_list(reviewed);
    }

    /// Comma-separated word list up to the line break. Text and whitespace
    /// accumulate into a buffer; a backtick literal replaces the buffer
    /// outright; a trailing `(n)` grades the word just flushed.
    fn parse_word_list(&mut self, reviewed: bool) {
        let mut buf = String::new();
        let mut buf_start = 0u32;
        let mut buf_end = 0u32;
        let mut buf_line = 0u32;

        loop {
            match self.token.kind {
                TokenKind::LineBreak | TokenKind::Eof => {
                    self.flush_word(reviewed, &mut buf, buf_start, buf_end, buf_line);
                    return;
                }
                TokenKind::Comma => {
                    self.flush_word(reviewed, &mut buf, buf_start, buf_end, buf_line);
                    self.next_token_not_whitespace();
                }
                TokenKind::WordLiteral => {
                    let word = Word {
                        text: self.token.text.to_string(),
                        line: self.token.line,
                        start: self.token.start,
                        end: self.token.end,
                        literally: true,
                        grade: 0,
                    };
                    buf.clear();
                    self.push_word(reviewed, word);
                    self.next_token_not_whitespace();
                }
                TokenKind::SemanticSpecifier => {
                    let Ok(grade) = self.token.text.parse::<i32>() else {
                        self.error_here(INVALID_SCORE);
                        return;
                    };
                    self.flush_word(reviewed, &mut buf, buf_start, buf_end, buf_line);
                    if let Some(word) = self.words_section_mut(reviewed).words.last_mut() {
                        word.grade = grade;
                    }
                    self.next_token_not_whitespace();
                }
                TokenKind::CommentTrivia => {
                    self.next_token();
                }
                TokenKind::Whitespace if buf.is_empty() => {
                    self.next_token();
                }
                _ => {
                    if buf.is_empty() {
                        buf_start = self.token.start;
                        buf_line = self.token.line;
                    }
                    buf.push_str(&self.token.text);
                    buf_end = self.token.end;
                    self.next_token();
                }
            }
        }
    }

    /// Current token opens an utterance. Everything up to the line break,
    /// whitespace included, becomes one prose line.
    fn parse_utterance(&mut self) {
        let start = self.token.start;
        let line = self.token.line;
        let mut text = String::new();

        loop {
            match self.token.kind {
                TokenKind::LineBreak | TokenKind::Eof => break,
                _ => {
                    text.push_str(&self.token.text);
                    self.next_token();
                }
            }
        }

        let end = start + text.chars().count() as u32;
        self.current_section_mut().utterances.push(UtteranceSection { text, line, start, end });
    }

    /// Flush the accumulated buffer into a word, trimming trailing
    /// whitespace out of both the text and the span. Duplicates within the
    /// words line are dropped with a warning.
    fn flush_word(&mut self, reviewed: bool, buf: &mut String, start: u32, end: u32, line: u32) {
        if buf.trim().is_empty() {
            buf.clear();
            return;
        }
        let trimmed = buf.trim_end();
        let dropped = (buf.chars().count() - trimmed.chars().count()) as u32;
        let word = Word {
            text: trimmed.to_string(),
            line,
            start,
            end: end - dropped,
            literally: false,
            grade: 0,
        };
        buf.clear();
        self.push_word(reviewed, word);
    }

    /// Append a word to the current words line unless its text already
    /// appears there.
    fn push_word(&mut self, reviewed: bool, word: Word) {
        let duplicate =
            self.words_section_mut(reviewed).words.iter().any(|existing| existing.text == word.text);
        if duplicate {
            let diagnostic =
                Diagnostic::warning(DUPLICATE_TOKEN, word.line, word.start, word.end);
            self.current_section_mut().diagnostics.push(diagnostic);
            return;
        }
        self.words_section_mut(reviewed).words.push(word);
    }

    /// Record an error diagnostic at the current token and skip the rest of
    /// the line. One error per line keeps recovery predictable.
    fn error_here(&mut self, message: &str) {
        let diagnostic =
            Diagnostic::error(message, self.token.line, self.token.start, self.token.end);
        self.current_section_mut().diagnostics.push(diagnostic);

        while !matches!(self.token.kind, TokenKind::LineBreak | TokenKind::Eof) {
            self.next_token();
        }
    }

    fn start_new_section(&mut self) {
        let uri = self.ast.uri.clone();
        self.ast.sections.push(VocabularySection::new(uri));
    }

    fn current_section(&self) -> &VocabularySection {
        &self.ast.sections[self.ast.sections.len() - 1]
    }

    fn current_section_mut(&mut self) -> &mut VocabularySection {
        if self.ast.sections.is_empty() {
            self.start_new_section();
        }
        let last = self.ast.sections.len() - 1;
        &mut self.ast.sections[last]
    }

    /// The words line currently being filled. Only called from productions
    /// that just pushed one.
    fn words_section_mut(&mut self, reviewed: bool) -> &mut WordsSection {
        let section = self.current_section_mut();
        let list = if reviewed { &mut section.reviewed_words } else { &mut section.new_words };
        let last = list.len() - 1;
        &mut list[last]
    }

    fn next_token(&mut self) {
        self.token = self.scanner.scan();
    }

    fn next_token_not_whitespace(&mut self) {
        self.next_token();
        while self.token.kind == TokenKind::Whitespace {
            self.next_token();
        }
    }
}

/// Scan and parse `text` as the document at `uri`.
pub fn parse_document(uri: impl Into<String>, text: &str) -> VocabAst {
    Parser::new(uri, text).parse()
}
