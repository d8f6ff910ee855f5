//! Main TUI application state and logic

use crate::config::{Section, Value, ValueKind};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::FxHashSet;
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tree,
    Detail,
}

impl FocusedPane {
    /// Move focus to the other pane
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Detail,
            FocusedPane::Detail => FocusedPane::Tree,
        }
    }
}

/// One visible line of the flattened tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeRow {
    /// Dotted path from the root
    pub path: String,
    pub name: String,
    pub depth: usize,
    pub kind: ValueKind,
    /// Display form of the value; option count for sections
    pub summary: String,
    pub expanded: bool,
}

/// Flatten `section` in name order, descending into expanded subsections
fn flatten(
    section: &Section,
    prefix: &str,
    depth: usize,
    expanded: &FxHashSet<String>,
    rows: &mut Vec<TreeRow>,
) {
    for (name, value) in section.sorted_options() {
        let path = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", prefix, name)
        };
        let is_open = value.is_section() && expanded.contains(&path);
        let summary = match value {
            Value::Section(child) => format!("{} options", child.len()),
            other => other.to_string(),
        };

        rows.push(TreeRow {
            path: path.clone(),
            name: name.to_string(),
            depth,
            kind: value.kind(),
            summary,
            expanded: is_open,
        });

        if let (true, Value::Section(child)) = (is_open, value) {
            flatten(child, &path, depth + 1, expanded, rows);
        }
    }
}

/// The main application state
pub struct App<'cfg> {
    /// Root of the configuration being browsed
    root: &'cfg Section,

    /// Label shown in the tree pane title
    pub label: String,

    /// Paths of sections currently expanded
    expanded: FxHashSet<String>,

    /// Flattened visible tree, rebuilt whenever `expanded` changes
    pub rows: Vec<TreeRow>,

    /// Index of the selected row
    pub selected: usize,

    /// Scroll offset of the tree pane
    pub tree_scroll: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl<'cfg> App<'cfg> {
    /// Create a new app browsing `root`
    pub fn new(root: &'cfg Section, label: impl Into<String>) -> Self {
        let mut app = App {
            root,
            label: label.into(),
            expanded: FxHashSet::default(),
            rows: Vec::new(),
            selected: 0,
            tree_scroll: 0,
            focused_pane: FocusedPane::Tree,
            should_quit: false,
            status_message: String::from("Ready!"),
        };
        app.rebuild();
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// The currently selected row, if the tree is not empty
    pub fn selected_row(&self) -> Option<&TreeRow> {
        self.rows.get(self.selected)
    }

    /// The value behind the selected row
    pub fn selected_value(&self) -> Option<&'cfg Value> {
        let root = self.root;
        self.selected_row().and_then(|row| root.get_value(&row.path))
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        super::panes::render_tree_pane(
            frame,
            columns[0],
            &self.label,
            &self.rows,
            self.selected,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_detail_pane(
            frame,
            columns[1],
            self.selected_row(),
            self.selected_value(),
            self.focused_pane == FocusedPane::Detail,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.selected,
            self.rows.len(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.rows.len().saturating_sub(1),
            KeyCode::Right | KeyCode::Enter | KeyCode::Char('l') => self.expand(),
            KeyCode::Left | KeyCode::Char('h') => self.collapse(),
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let last = self.rows.len() - 1;
        self.selected = self.selected.saturating_add_signed(delta).min(last);
        if let Some(row) = self.selected_row() {
            self.status_message = row.path.clone();
        }
    }

    /// Expand the selected section
    fn expand(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if row.kind != ValueKind::Section {
            self.status_message = format!("'{}' is a {}", row.path, row.kind);
            return;
        }
        if row.expanded {
            return;
        }

        let path = row.path.clone();
        self.status_message = format!("Expanded {}", path);
        self.expanded.insert(path);
        self.rebuild();
    }

    /// Collapse the selected section, or jump to the parent of a leaf
    fn collapse(&mut self) {
        let Some(row) = self.selected_row() else {
            return;
        };

        if row.expanded {
            let path = row.path.clone();
            self.status_message = format!("Collapsed {}", path);
            self.expanded.remove(&path);
            self.rebuild();
            return;
        }

        let Some((parent, _)) = row.path.rsplit_once('.') else {
            return;
        };
        let parent = parent.to_string();
        if let Some(index) = self.rows.iter().position(|r| r.path == parent) {
            self.selected = index;
            self.status_message = parent;
        }
    }

    /// Rebuild the visible rows, keeping the selection on the same path
    fn rebuild(&mut self) {
        let selected_path = self.selected_row().map(|row| row.path.clone());

        let mut rows = Vec::new();
        flatten(self.root, "", 0, &self.expanded, &mut rows);
        self.rows = rows;

        self.selected = selected_path
            .and_then(|path| self.rows.iter().position(|row| row.path == path))
            .unwrap_or(0);
    }
}
