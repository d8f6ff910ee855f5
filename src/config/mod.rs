//! Configuration tree and query surface
//!
//! - [`hash`]: the djb2 chained hash table ([`FastHash`]) behind every section
//! - [`value`]: typed option values ([`Value`], [`ValueKind`])
//! - [`section`]: the [`Section`] tree and dotted-path resolution
//!
//! [`Config`] is the handle callers hold: it owns the root section of a
//! successfully parsed buffer and forwards queries to it.

pub mod hash;
pub mod section;
pub mod value;

pub use hash::{CleanupStats, Collision, FastHash, HashError, TableOptions};
pub use section::Section;
pub use value::{Value, ValueKind};

use crate::loader::{self, Source};
use crate::parser::{self, ParseError};
use crate::report::ErrorReporter;
use std::path::Path;

/// A parsed configuration
#[derive(Debug)]
pub struct Config {
    root: Section,
}

impl Config {
    /// Read and parse a configuration file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        let bytes = loader::read_file(path.as_ref())?;
        Self::from_buffer(&bytes)
    }

    /// Parse a configuration held in memory
    pub fn from_buffer(bytes: &[u8]) -> Result<Self, ParseError> {
        parser::parse(bytes).map(|root| Config { root })
    }

    /// Parse `source`, handing any failure to `reporter`.
    ///
    /// Returns `None` when no configuration is available.
    pub fn load(source: Source, reporter: &mut dyn ErrorReporter) -> Option<Self> {
        let label = source.label();
        let result = match source {
            Source::File(path) => Self::open(path),
            Source::Buffer { bytes, .. } => Self::from_buffer(&bytes),
        };

        match result {
            Ok(config) => Some(config),
            Err(err) => {
                reporter.report(&label, &err);
                None
            }
        }
    }

    pub fn root(&self) -> &Section {
        &self.root
    }

    /// Release the whole tree
    pub fn close(self) -> CleanupStats {
        self.root.destroy()
    }

    pub fn get_value(&self, path: &str) -> Option<&Value> {
        self.root.get_value(path)
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        self.root.get_bool(path)
    }

    pub fn get_int(&self, path: &str) -> Option<i64> {
        self.root.get_int(path)
    }

    pub fn get_float(&self, path: &str) -> Option<f64> {
        self.root.get_float(path)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.root.get_str(path)
    }

    pub fn get_section(&self, path: &str) -> Option<&Section> {
        self.root.get_section(path)
    }
}

impl From<Section> for Config {
    fn from(root: Section) -> Self {
        Config { root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ErrorKind;

    #[test]
    fn test_from_buffer_queries() {
        let config = Config::from_buffer(b"a = 1\n[S]\nb = \"x\"\n[/S]\n").unwrap();
        assert_eq!(config.get_int("a"), Some(1));
        assert_eq!(config.get_str("S.b"), Some("x"));
        assert!(config.get_value("S.missing").is_none());
        assert!(config.get_section("S").is_some());
        assert_eq!(config.root().len(), 2);
    }

    #[test]
    fn test_load_reports_failure() {
        let mut errors: Vec<ParseError> = Vec::new();
        let source = Source::Buffer {
            name: "inline".into(),
            bytes: b"[A]\n[/B]\n".to_vec(),
        };
        assert!(Config::load(source, &mut errors).is_none());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), ErrorKind::SectionMismatch);
    }

    #[test]
    fn test_open_missing_file() {
        let err = Config::open("/nonexistent/vconfig/test.cfg").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::File);
    }

    #[test]
    fn test_close_counts_root_options() {
        let config = Config::from_buffer(b"a = 1; b = 2; c = 3\n").unwrap();
        assert_eq!(config.close().released, 3);
    }
}
