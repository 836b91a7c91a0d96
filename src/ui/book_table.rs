use crate::app::state::AppState;
use crate::registry::BookField;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Table, TableState,
};

fn header_cell(field: BookField, state: &AppState) -> Cell<'static> {
    let sort = state.registry.sort();
    if sort.column == Some(field) {
        Cell::from(format!("{} {}", field.label(), sort.order.arrow())).style(Theme::sorted_column())
    } else {
        Cell::from(field.label())
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let registry = &state.registry;
    let title = format!(" Books ({}) ", registry.len());
    let block = Block::default()
        .title(title)
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(if registry.modal_open() {
            Theme::border()
        } else {
            Theme::border_focused()
        });

    if registry.is_empty() {
        let empty = Paragraph::new(Line::from(vec![
            Span::styled(" No books. Press ", Theme::hint_text()),
            Span::styled("a", Theme::key_hint()),
            Span::styled(" to add one.", Theme::hint_text()),
        ]))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let mut header_cells = vec![Cell::from("Sel")];
    header_cells.extend(BookField::ALL.iter().map(|f| header_cell(*f, state)));
    header_cells.push(Cell::from("Actions"));
    let header = Row::new(header_cells)
        .style(Theme::header_row())
        .bottom_margin(1);

    let rows: Vec<Row> = registry
        .sorted_view()
        .iter()
        .map(|book| {
            let selected = registry.is_selected(book.id);
            let check = if selected { "[x]" } else { "[ ]" };
            let style = if selected {
                Theme::row_selected()
            } else {
                Theme::row()
            };
            Row::new(vec![
                Cell::from(check),
                Cell::from(book.name.as_str()),
                Cell::from(book.price.as_str()),
                Cell::from(book.category.as_str()),
                Cell::from(book.description.as_str()),
                Cell::from(Span::styled("del", Theme::danger())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Percentage(25),
        Constraint::Length(10),
        Constraint::Percentage(15),
        Constraint::Min(20),
        Constraint::Length(7),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1)
        .row_highlight_style(Theme::row_cursor())
        .highlight_symbol("▶ ")
        .highlight_spacing(HighlightSpacing::Always);

    let mut table_state = TableState::new()
        .with_offset(state.scroll_offset)
        .with_selected(Some(state.cursor));
    frame.render_stateful_widget(table, area, &mut table_state);
}
