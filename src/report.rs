//! Error reporting collaborators
//!
//! The parser never prints. Callers that want messages pass an
//! [`ErrorReporter`] to [`Config::load`](crate::config::Config::load).

use crate::parser::ParseError;
use std::io::{self, Write};

/// Receives each failed parse along with the label of its source
pub trait ErrorReporter {
    fn report(&mut self, file: &str, error: &ParseError);
}

/// Formats a parse error as `file:line: message`, or `file: message` when
/// the error has no line
pub fn format_error(file: &str, error: &ParseError) -> String {
    match error.line() {
        Some(line) => format!("{}:{}: {}", file, line, error),
        None => format!("{}: {}", file, error),
    }
}

/// Writes formatted errors to standard error
#[derive(Debug, Default)]
pub struct StderrReporter;

impl ErrorReporter for StderrReporter {
    fn report(&mut self, file: &str, error: &ParseError) {
        let _ = writeln!(io::stderr().lock(), "{}", format_error(file, error));
    }
}

/// Collects the errors themselves, mostly for tests
impl ErrorReporter for Vec<ParseError> {
    fn report(&mut self, _file: &str, error: &ParseError) {
        self.push(error.clone());
    }
}

/// Collects formatted messages
impl ErrorReporter for Vec<String> {
    fn report(&mut self, file: &str, error: &ParseError) {
        self.push(format_error(file, error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    #[test]
    fn test_format_with_line() {
        let err = ParseError::DepthUnderflow { line: 7 };
        assert_eq!(
            format_error("app.cfg", &err),
            "app.cfg:7: End of section found when already at root section."
        );
    }

    #[test]
    fn test_format_without_line() {
        let err = ParseError::File {
            path: PathBuf::from("gone.cfg"),
            source: Arc::new(io::Error::new(io::ErrorKind::NotFound, "missing")),
        };
        assert!(format_error("gone.cfg", &err).starts_with("gone.cfg: Unable to open"));
    }

    #[test]
    fn test_collectors() {
        let err = ParseError::InvalidToken {
            line: 2,
            text: "@".into(),
        };

        let mut messages: Vec<String> = Vec::new();
        messages.report("x.cfg", &err);
        assert_eq!(messages, vec!["x.cfg:2: Invalid token '@'".to_string()]);

        let mut errors: Vec<ParseError> = Vec::new();
        errors.report("x.cfg", &err);
        assert_eq!(errors[0].line(), Some(2));
        assert_eq!(errors[0].to_string(), err.to_string());
    }

    #[test]
    fn test_collected_file_error_keeps_source() {
        let err = ParseError::File {
            path: PathBuf::from("gone.cfg"),
            source: Arc::new(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
        };

        let mut errors: Vec<ParseError> = Vec::new();
        errors.report("gone.cfg", &err);
        match &errors[0] {
            ParseError::File { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
