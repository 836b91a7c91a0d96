use crate::app::state::AppState;
use crate::config::DeleteDispatch;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    parts.push(Span::styled(
        format!(" {} ", state.status_line()),
        Theme::status_bar(),
    ));

    // Mode indicator
    let mode = if state.registry.is_editing() {
        "EDIT"
    } else if state.registry.modal_open() {
        "ADD"
    } else {
        match state.config.behavior.delete_dispatch {
            DeleteDispatch::Explicit => "TABLE",
            DeleteDispatch::Legacy => "TABLE*",
        }
    };

    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + mode.len() + 3);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        format!(" [{}] ", mode),
        Style::default().fg(Theme::ACCENT_TEAL).bg(Theme::BG_ELEVATED),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
