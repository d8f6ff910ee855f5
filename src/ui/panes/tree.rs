//! Tree pane rendering: the flattened section tree with the selected row highlighted

use crate::config::ValueKind;
use crate::ui::app::TreeRow;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Keep `selected` inside the visible window of `visible_height` rows
pub fn clamp_scroll(selected: usize, visible_height: usize, scroll_offset: &mut usize) {
    let visible_height = visible_height.max(1);
    if selected < *scroll_offset {
        *scroll_offset = selected;
    } else if selected >= *scroll_offset + visible_height {
        *scroll_offset = selected + 1 - visible_height;
    }
}

fn row_line(row: &TreeRow, is_selected: bool) -> Line<'static> {
    let indent = "  ".repeat(row.depth);
    let marker = match (row.kind, row.expanded) {
        (ValueKind::Section, true) => "▾ ",
        (ValueKind::Section, false) => "▸ ",
        _ => "  ",
    };

    let name_style = if row.kind == ValueKind::Section {
        Style::default()
            .fg(DEFAULT_THEME.section)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };

    let mut spans = vec![
        Span::raw(indent),
        Span::styled(marker, Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(row.name.clone(), name_style),
    ];

    if row.kind == ValueKind::Section {
        spans.push(Span::styled(
            format!("  ({})", row.summary),
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    } else {
        spans.push(Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)));
        spans.push(Span::styled(
            row.summary.clone(),
            Style::default().fg(DEFAULT_THEME.value_color(row.kind)),
        ));
    }

    let line = Line::from(spans);
    if is_selected {
        line.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
    } else {
        line
    }
}

/// Render the tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    rows: &[TreeRow],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(border_style);

    if rows.is_empty() {
        let paragraph = Paragraph::new("(empty configuration)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders
    clamp_scroll(selected, visible_height, scroll_offset);

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(index, row)| ListItem::new(row_line(row, index == selected)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
