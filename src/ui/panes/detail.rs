//! Detail pane rendering: path, kind and value of the selected option

use crate::config::Value;
use crate::ui::app::TreeRow;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

fn field(label: &'static str, value: String, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<6}", label),
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, style),
    ])
}

/// Render the detail pane
pub fn render_detail_pane(
    frame: &mut Frame,
    area: Rect,
    row: Option<&TreeRow>,
    value: Option<&Value>,
    is_focused: bool,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Option ")
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 1, 0, 0));

    let (Some(row), Some(value)) = (row, value) else {
        let paragraph = Paragraph::new("(nothing selected)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let plain = Style::default().fg(DEFAULT_THEME.fg);
    let value_style = Style::default().fg(DEFAULT_THEME.value_color(row.kind));

    let mut lines = vec![
        field("path", row.path.clone(), plain),
        field("kind", row.kind.to_string(), plain),
    ];

    match value {
        Value::Section(section) => {
            lines.push(field("size", format!("{} options", section.len()), value_style));
            lines.push(Line::default());
            for (name, child) in section.sorted_options() {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {}", name), plain),
                    Span::styled(" : ", Style::default().fg(DEFAULT_THEME.comment)),
                    Span::styled(
                        child.kind().to_string(),
                        Style::default().fg(DEFAULT_THEME.value_color(child.kind())),
                    ),
                ]));
            }
        }
        other => lines.push(field("value", other.to_string(), value_style)),
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
