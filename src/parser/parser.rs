use crate::config::{Section, Value};
use crate::constants::{MAX_DEPTH, ROOT_SECTION_NAME};
use crate::parser::error::ParseError;
use crate::parser::lexer::{Lexer, Token, TokenKind};
use tracing::{debug, trace, warn};

/// One open section on the parser's stack
struct Frame<'src> {
    /// Name as written in the opening marker, matched byte-for-byte on close
    name: &'src [u8],
    section: Section,
}

/// Recursive descent parser for configuration text
///
/// Pulls tokens from the [`Lexer`] one at a time. Open sections live on an
/// explicit stack above the root; a section is attached to its parent when
/// its closing marker is matched.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token,
    line: usize,
    root: Section,
    /// Open sections, innermost last. Its length is the current depth.
    stack: Vec<Frame<'src>>,
}

impl<'src> Parser<'src> {
    pub fn new(input: &'src [u8]) -> Self {
        let mut lexer = Lexer::new(input);
        let line = lexer.line();
        let current = lexer.next_token();

        Self {
            lexer,
            current,
            line,
            root: Section::new(),
            stack: Vec::with_capacity(MAX_DEPTH),
        }
    }

    /// Parse the whole buffer into its root section.
    ///
    /// Any failure aborts the parse; everything built so far is dropped before
    /// the error is returned.
    pub fn parse_config(mut self) -> Result<Section, ParseError> {
        match self.parse_statements() {
            Ok(root) => {
                debug!(section = ROOT_SECTION_NAME, options = root.len(), "parse complete");
                Ok(root)
            }
            Err(err) => {
                debug!(kind = %err.kind(), line = ?err.line(), "parse failed");
                self.stack.clear();
                self.root = Section::new();
                Err(err)
            }
        }
    }

    fn parse_statements(&mut self) -> Result<Section, ParseError> {
        loop {
            match self.current.kind {
                TokenKind::Eof => break,
                TokenKind::Newline | TokenKind::Comment | TokenKind::Semicolon => self.advance(),
                TokenKind::LBracket => self.parse_section_marker()?,
                TokenKind::Identifier => self.parse_assignment()?,
                TokenKind::Invalid => return Err(self.invalid_token()),
                _ => return Err(self.unexpected_token()),
            }
        }

        if let Some(open) = self.stack.last() {
            return Err(ParseError::UnclosedSection {
                line: self.line,
                depth: self.depth(),
                name: String::from_utf8_lossy(open.name).into_owned(),
            });
        }

        Ok(std::mem::take(&mut self.root))
    }

    /// `identifier '=' value`
    fn parse_assignment(&mut self) -> Result<(), ParseError> {
        let name = self.lexer.text_lossy(&self.current);
        self.advance();

        if self.current.kind == TokenKind::Eof {
            return Err(self.unexpected_eof());
        }
        if self.current.kind != TokenKind::Assign {
            return Err(self.unexpected_token());
        }
        self.advance();

        let value = self.parse_value()?;
        self.advance();
        self.expect_statement_end()?;

        let section = self.current_section();
        if let Err(rejected) = section.insert(&name, value) {
            warn!(name = %name, bucket = rejected.index, "option rejected by section table");
        }
        Ok(())
    }

    /// Convert the current literal token. Does not consume it.
    fn parse_value(&self) -> Result<Value, ParseError> {
        let text = self.lexer.text(&self.current);
        match self.current.kind {
            TokenKind::Boolean(value) => Ok(Value::Boolean(value)),
            TokenKind::Integer => std::str::from_utf8(text)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .map(Value::Integer)
                .ok_or_else(|| self.invalid_token()),
            TokenKind::Float => std::str::from_utf8(text)
                .ok()
                .and_then(parse_float)
                .map(Value::Float)
                .ok_or_else(|| self.invalid_token()),
            TokenKind::String => Ok(Value::String(String::from_utf8_lossy(text).into_owned())),
            TokenKind::Eof => Err(self.unexpected_eof()),
            TokenKind::Invalid => Err(self.invalid_token()),
            _ => Err(self.unexpected_token()),
        }
    }

    /// `'[' ['/'] name ']'`
    fn parse_section_marker(&mut self) -> Result<(), ParseError> {
        // The marker is classified from the raw byte after '['
        let marker = self.lexer.section_marker();
        self.advance();

        let name = match self.current.kind {
            TokenKind::Identifier => self.lexer.text(&self.current),
            TokenKind::Eof => return Err(self.unexpected_eof()),
            TokenKind::Invalid => return Err(self.invalid_token()),
            _ => {
                return Err(ParseError::Expected {
                    line: self.line,
                    expected: "section name",
                    found: self.current.kind.describe(),
                })
            }
        };
        self.advance();
        self.expect_token(TokenKind::RBracket)?;

        match marker.kind {
            TokenKind::SectionEnd => self.close_section(name)?,
            _ => self.open_section(name)?,
        }
        self.expect_statement_end()
    }

    fn open_section(&mut self, name: &'src [u8]) -> Result<(), ParseError> {
        if self.depth() >= MAX_DEPTH {
            return Err(ParseError::DepthOverflow {
                line: self.line,
                max: MAX_DEPTH,
            });
        }

        self.stack.push(Frame {
            name,
            section: Section::new(),
        });
        debug!(
            name = %String::from_utf8_lossy(name),
            depth = self.depth(),
            "section opened"
        );
        Ok(())
    }

    fn close_section(&mut self, name: &'src [u8]) -> Result<(), ParseError> {
        let Some(frame) = self.stack.pop() else {
            return Err(ParseError::DepthUnderflow { line: self.line });
        };

        // A mismatched frame is dropped here; the parse is over anyway
        if frame.name != name {
            return Err(ParseError::SectionMismatch {
                line: self.line,
                open: String::from_utf8_lossy(frame.name).into_owned(),
                close: String::from_utf8_lossy(name).into_owned(),
            });
        }

        let key = String::from_utf8_lossy(frame.name).into_owned();
        debug!(name = %key, depth = self.depth() + 1, "section closed");
        if let Err(rejected) = self.current_section().insert(&key, Value::Section(frame.section)) {
            warn!(name = %key, bucket = rejected.index, "section rejected by parent table");
        }
        Ok(())
    }

    /// Number of open sections below the root
    fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The innermost open section, or the root at depth 0
    fn current_section(&mut self) -> &mut Section {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.section,
            None => &mut self.root,
        }
    }

    /// A statement ends at a newline, `;`, a comment or the end of input.
    /// Only the end of input is left unconsumed here.
    fn expect_statement_end(&mut self) -> Result<(), ParseError> {
        match self.current.kind {
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::Comment => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            TokenKind::Invalid => Err(self.invalid_token()),
            found => Err(ParseError::Expected {
                line: self.line,
                expected: "end of statement",
                found: found.describe(),
            }),
        }
    }

    fn expect_token(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else if self.check(TokenKind::Eof) {
            Err(self.unexpected_eof())
        } else {
            Err(ParseError::Expected {
                line: self.line,
                expected: kind.describe(),
                found: self.current.kind.describe(),
            })
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn advance(&mut self) {
        self.line = self.lexer.line();
        self.current = self.lexer.next_token();
        trace!(
            kind = %self.current.kind,
            line = self.line,
            start = self.current.start,
            len = self.current.len,
            "token"
        );
    }

    fn unexpected_eof(&self) -> ParseError {
        ParseError::UnexpectedEof { line: self.line }
    }

    fn unexpected_token(&self) -> ParseError {
        ParseError::UnexpectedToken {
            line: self.line,
            found: self.current.kind.describe(),
            text: self.lexer.text_lossy(&self.current),
        }
    }

    fn invalid_token(&self) -> ParseError {
        ParseError::InvalidToken {
            line: self.line,
            text: self.lexer.text_lossy(&self.current),
        }
    }
}

/// Decimal float; a literal without digits (`.`, `-.`) is 0.0
fn parse_float(text: &str) -> Option<f64> {
    if text.bytes().any(|c| c.is_ascii_digit()) {
        text.parse().ok()
    } else {
        Some(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::error::ErrorKind;

    fn parse(source: &str) -> Result<Section, ParseError> {
        Parser::new(source.as_bytes()).parse_config()
    }

    fn fails_with(source: &str) -> ErrorKind {
        match parse(source) {
            Ok(_) => panic!("expected {:?} to fail", source),
            Err(err) => err.kind(),
        }
    }

    #[test]
    fn test_parse_flat_assignments() {
        let root = parse("a = 1\nb = 2.5\nc = 'text'\nd = yes\n").unwrap();
        assert_eq!(root.get_int("a"), Some(1));
        assert_eq!(root.get_float("b"), Some(2.5));
        assert_eq!(root.get_str("c"), Some("text"));
        assert_eq!(root.get_bool("d"), Some(true));
        assert_eq!(root.len(), 4);
    }

    #[test]
    fn test_parse_nested_sections() {
        let root = parse("a = 1\n[S]\nb = \"x\"\n[T]\nc = -3\n[/T]\n[/S]\n").unwrap();
        assert_eq!(root.get_int("a"), Some(1));
        assert_eq!(root.get_str("S.b"), Some("x"));
        assert_eq!(root.get_int("S.T.c"), Some(-3));
        assert!(root.get_value("S.missing").is_none());
        assert!(root.get_value("a.x").is_none());
    }

    #[test]
    fn test_semicolons_and_comments() {
        let root = parse("a = 1; b = 2 # trailing\n# whole line\nc=3;").unwrap();
        assert_eq!(root.get_int("a"), Some(1));
        assert_eq!(root.get_int("b"), Some(2));
        assert_eq!(root.get_int("c"), Some(3));
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("\n\n  \t\n# nothing\n").unwrap().is_empty());
    }

    #[test]
    fn test_missing_final_newline() {
        let root = parse("[S]\nx = 1\n[/S]").unwrap();
        assert_eq!(root.get_int("S.x"), Some(1));
    }

    #[test]
    fn test_section_mismatch() {
        let err = parse("[A]\nx=1\n[/B]\n").unwrap_err();
        match err {
            ParseError::SectionMismatch { line, open, close } => {
                assert_eq!(line, 3);
                assert_eq!(open, "A");
                assert_eq!(close, "B");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_close_name_must_match_exactly() {
        assert_eq!(fails_with("[AB]\n[/A]\n"), ErrorKind::SectionMismatch);
        assert_eq!(fails_with("[A]\n[/AB]\n"), ErrorKind::SectionMismatch);
    }

    #[test]
    fn test_depth_underflow() {
        assert_eq!(fails_with("[/S]\n"), ErrorKind::DepthUnderflow);
    }

    #[test]
    fn test_unclosed_section() {
        let err = parse("[S]\nx = 1\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnclosedSection { depth: 1, ref name, .. } if name == "S"
        ));
    }

    #[test]
    fn test_depth_limit() {
        let mut ok = String::new();
        for i in 0..MAX_DEPTH {
            ok.push_str(&format!("[s{i}]\n"));
        }
        for i in (0..MAX_DEPTH).rev() {
            ok.push_str(&format!("[/s{i}]\n"));
        }
        assert!(parse(&ok).is_ok());

        let mut deep = String::new();
        for i in 0..=MAX_DEPTH {
            deep.push_str(&format!("[s{i}]\n"));
        }
        assert_eq!(fails_with(&deep), ErrorKind::DepthOverflow);
    }

    #[test]
    fn test_assignment_errors() {
        assert_eq!(fails_with("a 1\n"), ErrorKind::UnexpectedToken);
        assert_eq!(fails_with("a"), ErrorKind::UnexpectedEof);
        assert_eq!(fails_with("a ="), ErrorKind::UnexpectedEof);
        assert_eq!(fails_with("a = b\n"), ErrorKind::UnexpectedToken);
        assert_eq!(fails_with("a = 1.2.3\n"), ErrorKind::InvalidToken);
        assert_eq!(fails_with("a = 'open\n"), ErrorKind::InvalidToken);
        assert_eq!(fails_with("a = 1 b = 2\n"), ErrorKind::Expected);
    }

    #[test]
    fn test_integer_overflow_is_invalid() {
        assert_eq!(
            fails_with("big = 99999999999999999999\n"),
            ErrorKind::InvalidToken
        );
    }

    #[test]
    fn test_top_level_errors() {
        assert_eq!(fails_with("= 1\n"), ErrorKind::UnexpectedToken);
        assert_eq!(fails_with("42\n"), ErrorKind::UnexpectedToken);
        assert_eq!(fails_with("@x = 1\n"), ErrorKind::InvalidToken);
        assert_eq!(fails_with("[S\n"), ErrorKind::Expected);
        assert_eq!(fails_with("[]\n"), ErrorKind::Expected);
        assert_eq!(fails_with("["), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_error_line_numbers() {
        let err = parse("a = 1\n\n\nb = ?\n").unwrap_err();
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn test_float_without_digits_is_zero() {
        let root = parse("a = .\nb = -.\nc = 5.\nd = -.25\n").unwrap();
        assert_eq!(root.get_float("a"), Some(0.0));
        assert_eq!(root.get_float("b"), Some(0.0));
        assert_eq!(root.get_float("c"), Some(5.0));
        assert_eq!(root.get_float("d"), Some(-0.25));
        assert_eq!(fails_with("e = -\n"), ErrorKind::InvalidToken);
    }

    #[test]
    fn test_assignments_after_close_go_to_parent() {
        let root = parse("[A]\n[B]\nx = 1\n[/B]\ny = 2\n[/A]\nz = 3\n").unwrap();
        assert_eq!(root.get_int("A.B.x"), Some(1));
        assert_eq!(root.get_int("A.y"), Some(2));
        assert_eq!(root.get_int("z"), Some(3));
        assert_eq!(root.len(), 2);

        assert_eq!(fails_with("[A]\n[/A]\n[/A]\n"), ErrorKind::DepthUnderflow);
    }

    #[test]
    fn test_boolean_forms() {
        let root = parse("a = YES\nb = t\nc = no\nd = F\n").unwrap();
        assert_eq!(root.get_bool("a"), Some(true));
        assert_eq!(root.get_bool("b"), Some(true));
        assert_eq!(root.get_bool("c"), Some(false));
        assert_eq!(root.get_bool("d"), Some(false));
    }

    #[test]
    fn test_reparse_is_structurally_equal() {
        let source = "a = 1\n[S]\nb = \"x\"\n[/S]\n";
        let first = parse(source).unwrap();
        let second = parse(source).unwrap();
        assert_eq!(first, second);
        first.destroy();
        assert_eq!(parse(source).unwrap(), second);
    }

    #[test]
    fn test_later_assignment_shadows() {
        let root = parse("a = 1\na = 'two'\n").unwrap();
        assert_eq!(root.get_str("a"), Some("two"));
        assert_eq!(root.get_int("a"), None);
    }
}
