//! Lexer (tokenizer) for configuration text
//!
//! Scans a byte buffer one [`Token`] at a time for the parser. The scan is a
//! single forward pass: each token is classified from its first byte and never
//! re-read. Spaces, tabs and carriage returns separate tokens and are never
//! emitted. A NUL byte ends the input just like the end of the buffer does.
//!
//! Tokens are `(kind, start, len)` views into the buffer; use
//! [`Lexer::text`] to get the bytes back. String tokens exclude their quotes.

use std::fmt;

/// Token classes produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    Invalid,
    Newline,
    Semicolon,
    LBracket,
    RBracket,
    Comment,
    SectionBegin,
    SectionEnd,
    Identifier,
    Assign,
    Boolean(bool),
    Integer,
    Float,
    String,
}

impl TokenKind {
    /// Short human-readable name, used in error messages
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Eof => "end of file",
            TokenKind::Invalid => "invalid token",
            TokenKind::Newline => "newline",
            TokenKind::Semicolon => "';'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::Comment => "comment",
            TokenKind::SectionBegin => "section start",
            TokenKind::SectionEnd => "section end",
            TokenKind::Identifier => "identifier",
            TokenKind::Assign => "'='",
            TokenKind::Boolean(_) => "boolean",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::String => "string",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A classified span of the input buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub len: usize,
}

/// Lexer for configuration text
pub struct Lexer<'src> {
    input: &'src [u8],
    position: usize,
    line: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(input: &'src [u8]) -> Self {
        Self {
            input,
            position: 0,
            line: 1,
        }
    }

    /// Current line, starting at 1. Advances as newline tokens are scanned.
    pub fn line(&self) -> usize {
        self.line
    }

    /// The bytes a token covers
    pub fn text(&self, token: &Token) -> &'src [u8] {
        &self.input[token.start..token.start + token.len]
    }

    /// The token text as a string, for error messages
    pub fn text_lossy(&self, token: &Token) -> String {
        String::from_utf8_lossy(self.text(token)).into_owned()
    }

    /// Tokenize the remaining input, ending with a single `Eof` token
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            tokens.push(token);
            if token.kind == TokenKind::Eof {
                break;
            }
        }
        tokens
    }

    /// Scan the next token. Returns `Eof` at the end of input, repeatedly.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        let start = self.position;

        let Some(ch) = self.peek() else {
            return Token {
                kind: TokenKind::Eof,
                start,
                len: 0,
            };
        };

        let kind = match ch {
            b'\n' => {
                self.advance();
                self.line += 1;
                TokenKind::Newline
            }
            b';' => self.single(TokenKind::Semicolon),
            b'[' => self.single(TokenKind::LBracket),
            b']' => self.single(TokenKind::RBracket),
            b'=' => self.single(TokenKind::Assign),
            b'#' => {
                while self.peek().is_some_and(|c| c != b'\n') {
                    self.advance();
                }
                TokenKind::Comment
            }
            b'"' | b'\'' => return self.string_literal(ch),
            b'.' | b'-' | b'0'..=b'9' => self.number_literal(),
            c if is_identifier_start(c) => self.identifier_or_boolean(),
            _ => {
                self.advance();
                self.skip_to_delimiter();
                TokenKind::Invalid
            }
        };

        Token {
            kind,
            start,
            len: self.position - start,
        }
    }

    /// Classify the marker following a `[`: a `/` directly after the bracket
    /// makes it a section end, anything else a section start.
    pub fn section_marker(&mut self) -> Token {
        let start = self.position;
        if self.peek() == Some(b'/') {
            self.advance();
            Token {
                kind: TokenKind::SectionEnd,
                start,
                len: 1,
            }
        } else {
            Token {
                kind: TokenKind::SectionBegin,
                start,
                len: 0,
            }
        }
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// Quoted string. A quote preceded by a backslash does not close it;
    /// a newline or the end of input before the closing quote makes it invalid.
    fn string_literal(&mut self, quote: u8) -> Token {
        self.advance(); // opening quote
        let start = self.position;
        let mut previous = quote;

        while let Some(c) = self.peek() {
            if c == b'\n' || (c == quote && previous != b'\\') {
                break;
            }
            previous = c;
            self.advance();
        }

        let len = self.position - start;
        let kind = if self.peek() == Some(quote) {
            self.advance(); // closing quote
            TokenKind::String
        } else {
            TokenKind::Invalid
        };

        Token { kind, start, len }
    }

    /// Integer or float: optional leading `-`, digits, at most one `.`
    fn number_literal(&mut self) -> TokenKind {
        let mut kind = TokenKind::Integer;
        let mut digits = 0;
        let mut valid = true;

        if self.peek() == Some(b'-') {
            self.advance();
        }

        while let Some(c) = self.peek() {
            if is_number_delimiter(c) {
                break;
            }
            match c {
                b'.' if kind == TokenKind::Integer => kind = TokenKind::Float,
                b'0'..=b'9' => digits += 1,
                _ => valid = false,
            }
            self.advance();
        }

        // A float needs no digits at all: `.` reads as 0.0
        if valid && (digits > 0 || kind == TokenKind::Float) {
            kind
        } else {
            TokenKind::Invalid
        }
    }

    /// Identifier, reclassified as a boolean when it spells one
    fn identifier_or_boolean(&mut self) -> TokenKind {
        let start = self.position;
        let mut valid = true;
        self.advance();

        while let Some(c) = self.peek() {
            if is_identifier_delimiter(c) {
                break;
            }
            if !is_identifier_char(c) {
                // keep scanning so the token still spans the whole word
                valid = false;
            }
            self.advance();
        }

        if !valid {
            return TokenKind::Invalid;
        }

        match boolean_literal(&self.input[start..self.position]) {
            Some(value) => TokenKind::Boolean(value),
            None => TokenKind::Identifier,
        }
    }

    fn skip_to_delimiter(&mut self) {
        while self.peek().is_some_and(|c| !is_identifier_delimiter(c)) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r')) {
            self.advance();
        }
    }

    /// Peek at the current byte; NUL reads as end of input
    fn peek(&self) -> Option<u8> {
        self.input.get(self.position).copied().filter(|&c| c != 0)
    }

    fn advance(&mut self) {
        if self.position < self.input.len() {
            self.position += 1;
        }
    }
}

fn is_identifier_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || matches!(c, b'-' | b'_' | b'/' | b'\\')
}

fn is_identifier_char(c: u8) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}

fn is_identifier_delimiter(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n' | b'#' | b';' | b']' | b'=')
}

fn is_number_delimiter(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n' | b'#' | b';')
}

/// `y`, `yes`, `t`, `true` / `n`, `no`, `f`, `false`, in any case
fn boolean_literal(word: &[u8]) -> Option<bool> {
    const TRUE_WORDS: [&[u8]; 4] = [b"y", b"yes", b"t", b"true"];
    const FALSE_WORDS: [&[u8]; 4] = [b"n", b"no", b"f", b"false"];

    if TRUE_WORDS.iter().any(|w| word.eq_ignore_ascii_case(w)) {
        Some(true)
    } else if FALSE_WORDS.iter().any(|w| word.eq_ignore_ascii_case(w)) {
        Some(false)
    } else {
        None
    }
}
