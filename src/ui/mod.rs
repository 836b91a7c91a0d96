mod book_form;
mod book_table;
mod header;
pub mod layout;
mod status_bar;
mod theme;

use crate::app::state::AppState;
use ratatui::prelude::*;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    header::render(frame, app_layout.header, state);
    book_table::render(frame, app_layout.table, state);
    status_bar::render(frame, app_layout.status_bar, state);

    // Modal overlay
    book_form::render(frame, state);
}
