use ratatui::layout::{Constraint, Direction, Layout, Rect};

const HEADER_HEIGHT: u16 = 2;
const STATUS_HEIGHT: u16 = 1;
// Table borders plus the column header row and its bottom margin
const TABLE_CHROME: u16 = 4;

pub struct AppLayout {
    pub header: Rect,
    pub table: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Title + key hints
            Constraint::Min(5),                // Book table
            Constraint::Length(STATUS_HEIGHT), // Status bar
        ])
        .split(area);

    AppLayout {
        header: chunks[0],
        table: chunks[1],
        status_bar: chunks[2],
    }
}

/// Number of book rows that fit in a terminal of the given height.
pub fn table_rows(height: u16) -> usize {
    height.saturating_sub(HEADER_HEIGHT + STATUS_HEIGHT + TABLE_CHROME) as usize
}

/// Centered popup rect: `percent_w` of the width, fixed `height`, clamped
/// to the available area.
pub fn centered(area: Rect, percent_w: u16, min_w: u16, height: u16) -> Rect {
    let scaled = u32::from(area.width) * u32::from(percent_w) / 100;
    let w = u16::try_from(scaled)
        .unwrap_or(u16::MAX)
        .max(min_w)
        .min(area.width.saturating_sub(4));
    let h = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}
