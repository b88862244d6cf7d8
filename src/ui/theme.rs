//! Theme and styling configuration.

use ratatui::style::{Color, Modifier, Style};

/// Style tokens used by the record table.
///
/// Row-state tokens come in pairs: the row token is applied to the whole row
/// line and the cell token to each rendered cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableTheme {
    pub title: Style,
    pub header: Style,
    pub divider: Style,
    pub row: Style,
    pub cursor_row: Style,
    pub selected_row: Style,
    pub locked_row: Style,
    pub locked_cell: Style,
    pub highlighted_row: Style,
    pub highlighted_cell: Style,
    pub highlighted_alt_row: Style,
    pub highlighted_alt_cell: Style,
    pub disabled_row: Style,
    pub disabled_cell: Style,
    pub footer: Style,
    pub pager: Style,
    pub spinner: Style,
    pub error: Style,
    pub overlay: Style,
}

impl TableTheme {
    /// The dark theme.
    pub fn dark() -> Self {
        Self {
            title: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            header: Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            divider: Style::default().fg(Color::DarkGray),
            row: Style::default().fg(Color::White),
            cursor_row: Style::default().bg(Color::DarkGray),
            selected_row: Style::default().fg(Color::Black).bg(Color::Cyan),
            locked_row: Style::default().bg(Color::Rgb(60, 40, 40)),
            locked_cell: Style::default().fg(Color::Red),
            highlighted_row: Style::default().bg(Color::Rgb(40, 60, 40)),
            highlighted_cell: Style::default().fg(Color::Green),
            highlighted_alt_row: Style::default().bg(Color::Rgb(40, 40, 70)),
            highlighted_alt_cell: Style::default().fg(Color::LightBlue),
            disabled_row: Style::default(),
            disabled_cell: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
            footer: Style::default().fg(Color::Gray),
            pager: Style::default().fg(Color::Cyan),
            spinner: Style::default().fg(Color::Cyan),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            overlay: Style::default().add_modifier(Modifier::DIM),
        }
    }

    /// The light theme.
    pub fn light() -> Self {
        Self {
            title: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            header: Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
            row: Style::default().fg(Color::Black),
            cursor_row: Style::default().bg(Color::Gray),
            selected_row: Style::default().fg(Color::White).bg(Color::Blue),
            footer: Style::default().fg(Color::DarkGray),
            pager: Style::default().fg(Color::Blue),
            spinner: Style::default().fg(Color::Blue),
            ..Self::dark()
        }
    }

    /// Look up a theme by its settings name.
    pub fn named(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }
}

impl Default for TableTheme {
    fn default() -> Self {
        Self::dark()
    }
}
