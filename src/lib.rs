//! # Introduction
//!
//! vconfig reads line-oriented configuration files with nested sections and
//! answers typed queries against them by dotted path (`"server.tls.port"`).
//! A terminal tree browser built with [ratatui](https://docs.rs/ratatui) ships
//! with the `vconfig` binary.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → Section tree → Path queries
//! ```
//!
//! 1. [`loader`]: reads a file (or takes a buffer) into memory.
//! 2. [`parser`]: tokenises the buffer and builds the section tree in a
//!    single pass; the first error aborts the parse.
//! 3. [`config`]: the tree itself: [`config::Section`]s backed by a djb2
//!    chained hash table, holding tagged [`config::Value`]s, plus the
//!    [`Config`] handle with its typed getters.
//! 4. [`report`]: error reporting collaborators for [`Config::load`].
//! 5. [`directive`]: registry of typed callbacks for configuration
//!    directives.
//! 6. [`ui`]: ratatui-based tree browser; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use vconfig::Config;
//!
//! let config = Config::from_buffer(b"a = 1\n[S]\nb = \"x\"\n[/S]\n").unwrap();
//! assert_eq!(config.get_int("a"), Some(1));
//! assert_eq!(config.get_str("S.b"), Some("x"));
//! assert_eq!(config.get_value("a.x"), None);
//! ```

pub mod config;
pub mod constants;
pub mod directive;
pub mod loader;
pub mod parser;
pub mod report;
pub mod ui;

pub use config::{Config, Section, Value, ValueKind};
pub use loader::Source;
pub use parser::{ErrorKind, ParseError};
pub use report::{ErrorReporter, StderrReporter};
