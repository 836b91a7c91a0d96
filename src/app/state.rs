use crate::config::AppConfig;
use crate::registry::{Book, BookField, BookId, Change, Command, Registry};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

const STATUS_TTL: Duration = Duration::from_secs(4);

/// Single-line text editor for the focused form field.
///
/// `cursor` is a byte offset that always sits on a char boundary.
#[derive(Debug, Default)]
pub struct FieldEditor {
    pub text: String,
    pub cursor: usize,
}

impl FieldEditor {
    pub fn load(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.text.len();
    }

    /// Byte offset of the char boundary before the cursor.
    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .chars()
            .next_back()
            .map_or(0, |c| self.cursor - c.len_utf8())
    }

    /// Byte offset of the char boundary after the cursor.
    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn delete_back(&mut self) {
        let start = self.prev_boundary();
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    pub fn delete_forward(&mut self) {
        let end = self.next_boundary();
        self.text.replace_range(self.cursor..end, "");
    }

    pub fn move_left(&mut self) {
        self.cursor = self.prev_boundary();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.next_boundary();
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Remove the word before the cursor along with any whitespace after it.
    pub fn delete_word_back(&mut self) {
        let head = &self.text[..self.cursor];
        let trimmed = head.trim_end();
        let start = trimmed
            .rfind(char::is_whitespace)
            .map_or(0, |i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8));
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    /// Terminal column of the cursor.
    pub fn display_cursor(&self) -> usize {
        self.text[..self.cursor].width()
    }
}

/// Modal form view state. The field values themselves live in the
/// registry draft; this only tracks focus and the text cursor.
#[derive(Debug)]
pub struct FormState {
    pub focus: BookField,
    pub editor: FieldEditor,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            focus: BookField::Name,
            editor: FieldEditor::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub expires_at: Instant,
}

pub struct AppState {
    pub config: AppConfig,
    pub registry: Registry,
    pub cursor: usize,
    pub scroll_offset: usize,
    pub visible_rows: usize,
    pub form: FormState,
    pub should_quit: bool,
    pub dirty: bool,
    pub pending_bell: bool,
    pub status_message: Option<StatusMessage>,
}

impl AppState {
    pub fn new(config: AppConfig, books: Vec<Book>) -> Self {
        Self {
            config,
            registry: Registry::new(books),
            cursor: 0,
            scroll_offset: 0,
            visible_rows: 20,
            form: FormState::default(),
            should_quit: false,
            dirty: true,
            pending_bell: false,
            status_message: None,
        }
    }

    /// Apply a command to the registry and keep the view consistent with
    /// the result.
    pub fn dispatch(&mut self, command: Command) -> Change {
        let focus_row = self.cursor_book();
        let change = self.registry.apply(command);
        match &change {
            Change::ModalOpened { .. } => {
                self.form.focus = BookField::Name;
                self.sync_editor();
            }
            Change::Added(id) | Change::Updated(id) => self.follow(*id),
            Change::Deleted(_) if self.registry.modal_open() => self.sync_editor(),
            Change::Sorted(_) => {
                if let Some(id) = focus_row {
                    self.follow(id);
                }
            }
            _ => {}
        }
        if let Some(text) = change.summary() {
            self.set_status(text);
        }
        self.clamp_cursor();
        self.dirty = true;
        change
    }

    pub fn set_status(&mut self, text: String) {
        self.status_message = Some(StatusMessage {
            text,
            expires_at: Instant::now() + STATUS_TTL,
        });
        self.dirty = true;
    }

    /// Drop the status message once it has been shown long enough.
    pub fn expire_status(&mut self, now: Instant) {
        if self
            .status_message
            .as_ref()
            .is_some_and(|m| now >= m.expires_at)
        {
            self.status_message = None;
            self.dirty = true;
        }
    }

    /// Id of the book under the table cursor.
    pub fn cursor_book(&self) -> Option<BookId> {
        self.registry.sorted_view().get(self.cursor).map(|b| b.id)
    }

    pub fn move_up(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_sub(n);
        self.ensure_visible();
    }

    pub fn move_down(&mut self, n: usize) {
        let last = self.registry.len().saturating_sub(1);
        self.cursor = (self.cursor + n).min(last);
        self.ensure_visible();
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
        self.scroll_offset = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.registry.len().saturating_sub(1);
        self.ensure_visible();
    }

    pub fn set_viewport(&mut self, rows: usize) {
        self.visible_rows = rows.max(1);
        self.ensure_visible();
    }

    pub fn ensure_visible(&mut self) {
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = self.cursor + 1 - self.visible_rows;
        }
    }

    pub fn focus_next_field(&mut self) {
        self.form.focus = self.form.focus.next();
        self.sync_editor();
    }

    pub fn focus_prev_field(&mut self) {
        self.form.focus = self.form.focus.prev();
        self.sync_editor();
    }

    /// Push the editor text into the registry draft.
    pub fn commit_editor(&mut self) -> Change {
        let value = self.form.editor.text.clone();
        self.dispatch(Command::UpdateDraftField(self.form.focus, value))
    }

    pub fn status_line(&self) -> String {
        if let Some(ref msg) = self.status_message {
            return msg.text.clone();
        }
        let mut s = format!("Books: {}", self.registry.len());
        let selected = self.registry.selection().len();
        if selected > 0 {
            s.push_str(&format!(" | Selected: {}", selected));
        }
        s.push_str(&format!(" | Sort: {}", self.registry.sort().describe()));
        s
    }

    fn sync_editor(&mut self) {
        let text = self.registry.draft().get(self.form.focus).to_string();
        self.form.editor.load(&text);
    }

    fn follow(&mut self, id: BookId) {
        if let Some(pos) = self.registry.sorted_view().position_of(id) {
            self.cursor = pos;
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.registry.len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
        self.ensure_visible();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::seed;

    fn state() -> AppState {
        AppState::new(AppConfig::default(), seed::default_books().unwrap())
    }

    #[test]
    fn test_editor_utf8_editing() {
        let mut ed = FieldEditor::default();
        for c in "Café".chars() {
            ed.insert_char(c);
        }
        ed.move_left();
        ed.delete_forward();
        assert_eq!(ed.text, "Caf");
        ed.insert_char('é');
        ed.move_home();
        ed.move_right();
        ed.delete_back();
        assert_eq!(ed.text, "afé");
        assert_eq!(ed.cursor, 0);
        ed.move_end();
        assert_eq!(ed.display_cursor(), 3);
    }

    #[test]
    fn test_editor_delete_word_back() {
        let mut ed = FieldEditor::default();
        ed.load("The Hobbit  ");
        ed.delete_word_back();
        assert_eq!(ed.text, "The ");
        ed.delete_word_back();
        assert_eq!(ed.text, "");
        ed.delete_word_back();
        assert_eq!(ed.cursor, 0);
    }

    #[test]
    fn test_editor_delete_word_back_multibyte_separator() {
        let mut ed = FieldEditor::default();
        ed.load("Cien\u{3000}años");
        ed.delete_word_back();
        assert_eq!(ed.text, "Cien\u{3000}");
        assert_eq!(ed.cursor, ed.text.len());
    }

    #[test]
    fn test_editor_edges_are_noops() {
        let mut ed = FieldEditor::default();
        ed.delete_back();
        ed.move_left();
        assert_eq!(ed.cursor, 0);
        ed.load("ab");
        ed.delete_forward();
        ed.move_right();
        assert_eq!(ed.text, "ab");
        assert_eq!(ed.cursor, 2);
    }

    #[test]
    fn test_form_defaults_to_name_field() {
        let form = FormState::default();
        assert_eq!(form.focus, BookField::Name);
        assert!(form.editor.text.is_empty());
    }

    #[test]
    fn test_bulk_delete_resets_open_edit_form() {
        let mut st = state();
        st.dispatch(Command::OpenEditModal(1));
        st.focus_next_field();
        assert!(!st.form.editor.text.is_empty());
        st.dispatch(Command::ToggleSelect(2));
        st.dispatch(Command::DeleteSelected);
        assert!(st.registry.modal_open());
        assert!(!st.registry.is_editing());
        assert!(st.form.editor.text.is_empty());
    }

    #[test]
    fn test_cursor_clamped_after_delete_of_last_row() {
        let mut st = state();
        st.move_end();
        let last = st.cursor_book().unwrap();
        st.dispatch(Command::DeleteOne(last));
        assert_eq!(st.cursor, st.registry.len() - 1);
    }

    #[test]
    fn test_cursor_follows_added_book() {
        let mut st = state();
        st.dispatch(Command::SetSort(BookField::Name));
        st.dispatch(Command::OpenAddModal);
        st.form.editor.load("Aardvark Tales");
        st.commit_editor();
        let change = st.dispatch(Command::Submit);
        let Change::Added(id) = change else {
            panic!("expected an add, got {:?}", change);
        };
        assert_eq!(st.cursor, 0);
        assert_eq!(st.cursor_book(), Some(id));
        assert!(st.status_line().contains("Added book"));
    }

    #[test]
    fn test_cursor_stays_on_book_when_sorting() {
        let mut st = state();
        st.move_down(3);
        let id = st.cursor_book().unwrap();
        st.dispatch(Command::SetSort(BookField::Price));
        assert_eq!(st.cursor_book(), Some(id));
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let mut st = state();
        st.set_viewport(3);
        st.move_down(5);
        assert_eq!(st.scroll_offset, 3);
        st.move_up(5);
        assert_eq!(st.scroll_offset, 0);
    }

    #[test]
    fn test_status_expires() {
        let mut st = state();
        st.set_status("hello".into());
        st.expire_status(Instant::now());
        assert!(st.status_message.is_some());
        st.expire_status(Instant::now() + STATUS_TTL + Duration::from_secs(1));
        assert!(st.status_message.is_none());
        assert!(st.status_line().starts_with("Books: 8"));
    }
}
