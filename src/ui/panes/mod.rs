//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`tree`]: Flattened section tree with expand/collapse markers
//! - [`detail`]: Path, kind and value of the selected option
//! - [`status`]: Status bar with keybindings and selection position
//!
//! Each pane module exports a stateless `render_*` function; scroll state lives
//! in [`App`](crate::ui::App) and is passed in by reference.

pub mod detail;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use detail::render_detail_pane;
pub use status::render_status_bar;
pub use tree::render_tree_pane;
