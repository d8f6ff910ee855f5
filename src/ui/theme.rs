use crate::config::ValueKind;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub boolean: Color,
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub section: Color, // Cyan for section names
}

impl Theme {
    /// Color used to draw a value of the given kind
    pub fn value_color(&self, kind: ValueKind) -> Color {
        match kind {
            ValueKind::Boolean => self.boolean,
            ValueKind::Integer | ValueKind::Float => self.number,
            ValueKind::String => self.string,
            ValueKind::Section => self.section,
        }
    }
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    boolean: Color::Rgb(137, 180, 250),        // Blue, like keywords
    string: Color::Rgb(166, 227, 161),         // Green for strings
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for selected row
    section: Color::Rgb(148, 226, 213),        // Cyan/teal for sections
};
