//! Single-pass scanner for the `.vocab` syntax.
//!
//! The scanner walks the document once and never fails: malformed constructs
//! degrade to [`TokenKind::Text`]. Each call to [`Scanner::scan`] yields one
//! token carrying its half-open column span (counted in runes) and zero-based
//! line; the final token is [`TokenKind::Eof`].
//!
//! Date candidates get best-effort treatment: a digit starts a `dd/mm/yyyy`
//! collection that falls back to `Text` the moment the shape breaks. Backtick
//! literals auto-close at line breaks and end of input, so an unterminated
//! literal is still a [`TokenKind::WordLiteral`], never an error.

pub mod chars;

use vocab_token::{Token, TokenKind};

const DATE_LENGTH: usize = 10;

/// Cursor over one document.
///
/// Non-restartable: create a fresh scanner per parse.
pub struct Scanner<'a> {
    text: &'a str,
    /// Byte position of the next rune to read
    pos: usize,
    /// Column of the next rune on the current line, in runes
    col: u32,
    line: u32,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Scanner { text, pos: 0, col: 0, line: 0 }
    }

    /// Zero-based line of the next token
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Scan the next token. Returns `Eof` forever once the input is spent.
    pub fn scan(&mut self) -> Token {
        let start = self.col;
        let line = self.line;

        let Some(ch) = self.peek(0) else {
            return Token::new(TokenKind::Eof, "", start, start, line);
        };

        if chars::is_whitespace_single_line(ch) {
            self.bump(ch);
            return self.emit(TokenKind::Whitespace, ch.to_string(), start, line);
        }

        if chars::is_recognized_letter(ch) {
            let mut collected = String::new();
            while let Some(c) = self.peek(0) {
                if !chars::is_recognized_letter(c) {
                    break;
                }
                collected.push(c);
                self.bump(c);
            }
            return self.emit(TokenKind::Text, collected, start, line);
        }

        if chars::is_line_break(ch) {
            self.pos += ch.len_utf8();
            self.line += 1;
            self.col = 0;
            return Token::new(TokenKind::LineBreak, ch.to_string(), start, start + 1, line);
        }

        if ch.is_ascii_digit() {
            return self.scan_date(ch, start, line);
        }

        match ch {
            '/' => {
                self.bump(ch);
                self.emit(TokenKind::Slash, "/", start, line)
            }
            ',' => {
                self.bump(ch);
                self.emit(TokenKind::Comma, ",", start, line)
            }
            '|' => {
                self.bump(ch);
                while let Some(c) = self.peek(0) {
                    if chars::is_line_break(c) {
                        break;
                    }
                    self.bump(c);
                }
                // body discarded
                self.emit(TokenKind::CommentTrivia, "", start, line)
            }
            '>' => {
                self.bump(ch);
                if self.peek(0) == Some('>') {
                    self.bump('>');
                    self.emit(TokenKind::DoubleGreaterThan, ">>", start, line)
                } else {
                    self.emit(TokenKind::GreaterThan, ">", start, line)
                }
            }
            '`' => self.scan_word_literal(start, line),
            '(' => self.scan_semantic_specifier(start, line),
            _ => {
                self.bump(ch);
                self.emit(TokenKind::Text, ch.to_string(), start, line)
            }
        }
    }

    /// Best-effort `dd/mm/yyyy`. Slashes are accepted only at rune positions
    /// 2 and 5; anything off-shape flushes what was collected as `Text`.
    fn scan_date(&mut self, first: char, start: u32, line: u32) -> Token {
        let mut collected = String::from(first);
        self.bump(first);

        for i in 1..DATE_LENGTH {
            let Some(c) = self.peek(0) else {
                return self.emit(TokenKind::Text, collected, start, line);
            };
            if chars::is_line_break(c) {
                return self.emit(TokenKind::Text, collected, start, line);
            }
            let fits = if i == 2 || i == 5 { c == '/' } else { c.is_ascii_digit() };
            if !fits {
                return self.emit(TokenKind::Text, collected, start, line);
            }
            collected.push(c);
            self.bump(c);
        }

        self.emit(TokenKind::DateExpression, collected, start, line)
    }

    /// Consume from an opening backtick to the closing one, auto-closing at a
    /// line break or end of input. The payload is the inner text; the span
    /// covers the backticks.
    fn scan_word_literal(&mut self, start: u32, line: u32) -> Token {
        self.bump('`');
        let mut collected = String::new();
        loop {
            match self.peek(0) {
                None => break,
                Some(c) if chars::is_line_break(c) => break,
                Some('`') => {
                    self.bump('`');
                    break;
                }
                Some(c) => {
                    collected.push(c);
                    self.bump(c);
                }
            }
        }
        self.emit(TokenKind::WordLiteral, collected, start, line)
    }

    /// Consume `( ... )` on one line. A line break or end of input before the
    /// closing paren degrades to `Text` of everything consumed, the `(`
    /// included.
    fn scan_semantic_specifier(&mut self, start: u32, line: u32) -> Token {
        self.bump('(');
        let mut collected = String::new();
        loop {
            match self.peek(0) {
                None => {
                    return self.emit(TokenKind::Text, format!("({collected}"), start, line);
                }
                Some(c) if chars::is_line_break(c) => {
                    return self.emit(TokenKind::Text, format!("({collected}"), start, line);
                }
                Some(')') => {
                    self.bump(')');
                    return self.emit(TokenKind::SemanticSpecifier, collected, start, line);
                }
                Some(c) => {
                    collected.push(c);
                    self.bump(c);
                }
            }
        }
    }

    fn emit(&self, kind: TokenKind, text: impl Into<std::sync::Arc<str>>, start: u32, line: u32) -> Token {
        Token::new(kind, text, start, self.col, line)
    }

    fn peek(&self, nth: usize) -> Option<char> {
        self.text.get(self.pos..)?.chars().nth(nth)
    }

    fn bump(&mut self, ch: char) {
        self.pos += ch.len_utf8();
        self.col += 1;
    }
}
