//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into three layers:
//!
//! - **[`app`]**: browser state, keyboard event loop, pane focus, expanded sections
//! - **[`panes`]**: stateless render functions for each visible pane (tree,
//!   detail, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with the root
//! [`Section`] of a parsed configuration and call [`App::run`] to start the
//! event loop.
//!
//! [`Section`]: crate::config::Section
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
