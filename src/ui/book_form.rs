use crate::app::state::AppState;
use crate::registry::BookField;
use crate::ui::layout;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

const LABEL_WIDTH: u16 = 13;
const POPUP_HEIGHT: u16 = 14;

pub fn render(frame: &mut Frame, state: &AppState) {
    let registry = &state.registry;
    if !registry.modal_open() {
        return;
    }

    let popup_area = layout::centered(frame.area(), 60, 60, POPUP_HEIGHT);
    frame.render_widget(Clear, popup_area);

    let title = match registry.edit_target() {
        Some(id) => format!(" Edit Book #{} ", id),
        None => " Add Book ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border_focused())
        .style(Style::default().bg(Theme::BG_SURFACE));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    if inner.height < 10 || inner.width < LABEL_WIDTH + 4 {
        return;
    }

    let draft = registry.draft();
    for (i, field) in BookField::ALL.iter().enumerate() {
        let focused = *field == state.form.focus;
        let row = Rect::new(inner.x + 1, inner.y + 1 + i as u16 * 2, inner.width - 2, 1);

        let label_style = if focused {
            Theme::key_hint()
        } else {
            Theme::hint_text()
        };
        let value = draft.get(*field);
        let value_span = if value.is_empty() {
            Span::styled(field.label(), Theme::placeholder())
        } else {
            Span::styled(value, Theme::input_text())
        };
        let marker = if focused { "❯ " } else { "  " };
        let line = Line::from(vec![
            Span::styled(
                format!("{}{:<width$}", marker, field.label(), width = LABEL_WIDTH as usize - 2),
                label_style,
            ),
            value_span,
        ]);
        frame.render_widget(Paragraph::new(line), row);

        if focused {
            let offset = u16::try_from(state.form.editor.display_cursor()).unwrap_or(u16::MAX);
            let cursor_x = row.x.saturating_add(LABEL_WIDTH).saturating_add(offset);
            frame.set_cursor_position((cursor_x.min(row.right().saturating_sub(1)), row.y));
        }
    }

    // Buttons
    let submit = if registry.is_editing() { " Update  " } else { " Submit  " };
    let mut buttons = vec![
        Span::raw(" "),
        Span::styled("Enter", Theme::key_hint()),
        Span::styled(submit, Theme::hint_text()),
        Span::styled("Esc", Theme::key_hint()),
        Span::styled(" Cancel  ", Theme::hint_text()),
        Span::styled("Tab", Theme::key_hint()),
        Span::styled(" Next field  ", Theme::hint_text()),
    ];
    if registry.is_editing() {
        buttons.push(Span::styled("Ctrl+D", Theme::danger()));
        buttons.push(Span::styled(" Delete", Theme::hint_text()));
    }
    let buttons_area = Rect::new(inner.x, inner.y + inner.height - 2, inner.width, 1);
    frame.render_widget(Paragraph::new(Line::from(buttons)), buttons_area);
}
