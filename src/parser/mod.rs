//! Configuration text parser
//!
//! This module turns a configuration buffer into a tree of sections:
//! - [`lexer`]: Tokenization (bytes → tokens)
//! - [`parser`]: Parsing (tokens → [`Section`] tree)
//! - [`error`]: [`ParseError`] and its fieldless [`ErrorKind`] tag
//!
//! # Input Format
//!
//! ```text
//! # comment
//! name = "string"        # or 'string'
//! count = -12; ratio = .5
//! enabled = yes          # y/yes/t/true, n/no/f/false, any case
//!
//! [server]
//! port = 8080
//! [tls]
//! enabled = no
//! [/tls]
//! [/server]
//! ```
//!
//! Sections nest up to [`MAX_DEPTH`] levels below the root and must be closed
//! with the exact name they were opened with.
//!
//! # Parser Implementation
//!
//! Hand-written single-pass parser with one token of lookahead and an explicit
//! section stack. The first error aborts the whole parse.
//!
//! [`MAX_DEPTH`]: crate::constants::MAX_DEPTH

pub mod error;
pub mod lexer;
#[allow(clippy::module_inception)]
pub mod parser;

pub use error::{ErrorKind, ParseError};

use crate::config::Section;

/// Parse a complete buffer into its root section
pub fn parse(input: &[u8]) -> Result<Section, ParseError> {
    parser::Parser::new(input).parse_config()
}
