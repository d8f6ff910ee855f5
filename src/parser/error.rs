//! Parse errors for configuration text
//!
//! Every failure is fatal to the parse that raised it: the partially built
//! tree is dropped before the error is returned. All variants except
//! [`ParseError::File`] carry the line the parser was on when it failed.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// The configuration file could not be read
    #[error("Unable to open config file '{}': {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },

    /// Input ended in the middle of a statement
    #[error("Unexpected end of file.")]
    UnexpectedEof { line: usize },

    /// A token that cannot start or continue the current statement
    #[error("Unexpected token: {found} (value: {text})")]
    UnexpectedToken {
        line: usize,
        found: &'static str,
        text: String,
    },

    /// A specific token was required
    #[error("Expected {expected} instead of {found}")]
    Expected {
        line: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// Text the lexer could not classify, or a literal that cannot be stored
    #[error("Invalid token '{text}'")]
    InvalidToken { line: usize, text: String },

    /// A section close whose name differs from the innermost open section
    #[error("Expected end of section for '{open}', not '{close}'.")]
    SectionMismatch {
        line: usize,
        open: String,
        close: String,
    },

    /// A section close with no open section
    #[error("End of section found when already at root section.")]
    DepthUnderflow { line: usize },

    /// A section open at the maximum nesting depth
    #[error("Exceeded maximum section depth {max}. Use fewer subsections.")]
    DepthOverflow { line: usize, max: usize },

    /// Input ended with sections still open
    #[error("Section '{name}' was never closed ({depth} open at end of file).")]
    UnclosedSection {
        line: usize,
        depth: usize,
        name: String,
    },
}

/// Fieldless tag for each [`ParseError`] variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    File,
    UnexpectedEof,
    UnexpectedToken,
    Expected,
    InvalidToken,
    SectionMismatch,
    DepthUnderflow,
    DepthOverflow,
    UnclosedSection,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::File { .. } => ErrorKind::File,
            ParseError::UnexpectedEof { .. } => ErrorKind::UnexpectedEof,
            ParseError::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            ParseError::Expected { .. } => ErrorKind::Expected,
            ParseError::InvalidToken { .. } => ErrorKind::InvalidToken,
            ParseError::SectionMismatch { .. } => ErrorKind::SectionMismatch,
            ParseError::DepthUnderflow { .. } => ErrorKind::DepthUnderflow,
            ParseError::DepthOverflow { .. } => ErrorKind::DepthOverflow,
            ParseError::UnclosedSection { .. } => ErrorKind::UnclosedSection,
        }
    }

    /// The line the parser was on, for errors raised while scanning
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::File { .. } => None,
            ParseError::UnexpectedEof { line }
            | ParseError::UnexpectedToken { line, .. }
            | ParseError::Expected { line, .. }
            | ParseError::InvalidToken { line, .. }
            | ParseError::SectionMismatch { line, .. }
            | ParseError::DepthUnderflow { line }
            | ParseError::DepthOverflow { line, .. }
            | ParseError::UnclosedSection { line, .. } => Some(*line),
        }
    }
}
