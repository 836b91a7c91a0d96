use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const BG_DARK: Color = Color::Rgb(22, 24, 30);
    pub const BG_SURFACE: Color = Color::Rgb(30, 33, 41);
    pub const BG_ELEVATED: Color = Color::Rgb(40, 44, 54);
    pub const BORDER_DIM: Color = Color::Rgb(70, 76, 90);
    pub const TEXT_PRIMARY: Color = Color::Rgb(220, 223, 228);
    pub const TEXT_SECONDARY: Color = Color::Rgb(150, 156, 168);
    pub const TEXT_MUTED: Color = Color::Rgb(100, 106, 120);
    pub const ACCENT_TEAL: Color = Color::Rgb(80, 200, 190);
    pub const ACCENT_AMBER: Color = Color::Rgb(240, 180, 80);
    pub const ACCENT_GREEN: Color = Color::Rgb(130, 200, 110);
    pub const ACCENT_RED: Color = Color::Rgb(230, 100, 100);

    pub fn border_type() -> BorderType {
        BorderType::Rounded
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT_TEAL)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header_row() -> Style {
        Style::default()
            .fg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    }

    pub fn sorted_column() -> Style {
        Style::default()
            .fg(Self::ACCENT_AMBER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn row() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn row_selected() -> Style {
        Style::default().fg(Self::ACCENT_GREEN)
    }

    pub fn row_cursor() -> Style {
        Style::default()
            .fg(Self::BG_DARK)
            .bg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint() -> Style {
        Style::default()
            .fg(Self::ACCENT_AMBER)
            .add_modifier(Modifier::BOLD)
    }

    pub fn hint_text() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn danger() -> Style {
        Style::default()
            .fg(Self::ACCENT_RED)
            .add_modifier(Modifier::BOLD)
    }

    pub fn input_text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn placeholder() -> Style {
        Style::default()
            .fg(Self::TEXT_MUTED)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY).bg(Self::BG_ELEVATED)
    }
}
