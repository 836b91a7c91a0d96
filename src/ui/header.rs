use crate::app::state::AppState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

fn hint<'a>(key: &'a str, label: &'a str) -> [Span<'a>; 2] {
    [
        Span::styled(key, Theme::key_hint()),
        Span::styled(label, Theme::hint_text()),
    ]
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = Line::from(Span::styled(
        format!(" {} ", state.config.ui.title),
        Style::default()
            .fg(Theme::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD),
    ));

    let mut spans = vec![Span::raw(" ")];
    spans.extend(hint("a", " Add  "));
    spans.extend(hint("Enter", " Edit  "));
    spans.extend(hint("Space", " Select  "));
    spans.extend(hint("d", " Delete  "));
    if !state.registry.selection().is_empty() {
        spans.push(Span::styled("D", Theme::danger()));
        spans.push(Span::styled(" Delete Selected  ", Theme::hint_text()));
    }
    spans.extend(hint("1-4", " Sort  "));
    spans.extend(hint("0", " Unsort  "));
    spans.extend(hint("q", " Quit"));

    let paragraph = Paragraph::new(vec![title, Line::from(spans)]);
    frame.render_widget(paragraph, area);
}
