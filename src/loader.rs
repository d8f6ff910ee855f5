//! Where configuration bytes come from

use crate::parser::ParseError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Input for [`Config::load`](crate::config::Config::load)
#[derive(Debug, Clone)]
pub enum Source {
    /// A file on disk, read whole before parsing
    File(PathBuf),
    /// A buffer already in memory; `name` labels it in error reports
    Buffer { name: String, bytes: Vec<u8> },
}

impl Source {
    /// Label used as the file name when reporting errors
    pub fn label(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Buffer { name, .. } => name.clone(),
        }
    }
}

/// Read a configuration file into memory
pub fn read_file(path: &Path) -> Result<Vec<u8>, ParseError> {
    fs::read(path).map_err(|source| ParseError::File {
        path: path.to_path_buf(),
        source: Arc::new(source),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(Source::File(PathBuf::from("a/b.cfg")).label(), "a/b.cfg");
        let buffer = Source::Buffer {
            name: "<stdin>".into(),
            bytes: Vec::new(),
        };
        assert_eq!(buffer.label(), "<stdin>");
    }

    #[test]
    fn test_read_missing_file() {
        let err = read_file(Path::new("/nonexistent/vconfig.cfg")).unwrap_err();
        assert!(matches!(err, ParseError::File { .. }));
    }
}
