//! The book registry view-model.
//!
//! [`Registry`] owns the book list and all view state (modal, edit target,
//! selection, sort). Every mutation goes through [`Registry::apply`] with a
//! [`Command`], which returns a [`Change`] describing what happened.

pub mod book;
pub mod seed;
pub mod sort;

pub use book::{Book, BookDraft, BookField, BookId};
pub use sort::{SortColumn, SortState, SortedView};

use std::collections::BTreeSet;
use tracing::{debug, info};

/// A single user intent against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    OpenAddModal,
    OpenEditModal(BookId),
    UpdateDraftField(BookField, String),
    Submit,
    Cancel,
    ToggleSelect(BookId),
    DeleteOne(BookId),
    DeleteSelected,
    DeleteEditing,
    /// Row-level delete that redirects to the edit target or the selection
    /// when either exists.
    RequestDelete(BookId),
    SetSort(SortColumn),
    ClearSort,
}

/// What a command actually did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    None,
    ModalOpened { editing: Option<BookId> },
    ModalClosed,
    DraftEdited(BookField),
    Added(BookId),
    Updated(BookId),
    Deleted(Vec<BookId>),
    Selected(BookId),
    Deselected(BookId),
    Sorted(SortState),
}

impl Change {
    pub fn is_none(&self) -> bool {
        matches!(self, Change::None)
    }

    /// Short human-readable summary for the status bar.
    pub fn summary(&self) -> Option<String> {
        match self {
            Change::Added(id) => Some(format!("Added book #{}", id)),
            Change::Updated(id) => Some(format!("Updated book #{}", id)),
            Change::Deleted(ids) if ids.len() == 1 => Some(format!("Deleted book #{}", ids[0])),
            Change::Deleted(ids) => Some(format!("Deleted {} books", ids.len())),
            Change::Sorted(sort) => Some(format!("Sort: {}", sort.describe())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    books: Vec<Book>,
    selection: BTreeSet<BookId>,
    draft: BookDraft,
    edit_target: Option<BookId>,
    modal_open: bool,
    sort: SortState,
    next_id: BookId,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Registry {
    /// Build a registry from seed records. Ids continue after the largest
    /// seeded id and are never reused.
    pub fn new(books: Vec<Book>) -> Self {
        let next_id = books.iter().map(|b| b.id).max().map_or(1, |max| max + 1);
        Self {
            books,
            selection: BTreeSet::new(),
            draft: BookDraft::default(),
            edit_target: None,
            modal_open: false,
            sort: SortState::default(),
            next_id,
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn selection(&self) -> &BTreeSet<BookId> {
        &self.selection
    }

    pub fn is_selected(&self, id: BookId) -> bool {
        self.selection.contains(&id)
    }

    pub fn draft(&self) -> &BookDraft {
        &self.draft
    }

    pub fn edit_target(&self) -> Option<BookId> {
        self.edit_target
    }

    pub fn is_editing(&self) -> bool {
        self.edit_target.is_some()
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn sorted_view(&self) -> SortedView<'_> {
        SortedView::new(&self.books, self.sort)
    }

    /// Owned form of [`Registry::apply`]: state in, state out.
    #[cfg(test)]
    pub fn reduce(mut self, command: Command) -> Self {
        self.apply(command);
        self
    }

    pub fn apply(&mut self, command: Command) -> Change {
        match command {
            Command::OpenAddModal => {
                self.edit_target = None;
                self.draft.clear();
                self.modal_open = true;
                debug!("opened add modal");
                Change::ModalOpened { editing: None }
            }
            Command::OpenEditModal(id) => {
                let Some(draft) = self.get(id).map(BookDraft::from_book) else {
                    return Change::None;
                };
                self.draft = draft;
                self.edit_target = Some(id);
                self.modal_open = true;
                debug!(id, "opened edit modal");
                Change::ModalOpened { editing: Some(id) }
            }
            Command::UpdateDraftField(field, value) => {
                self.draft.set(field, value);
                Change::DraftEdited(field)
            }
            Command::Submit => self.apply_submit(),
            Command::Cancel => {
                self.close_modal();
                Change::ModalClosed
            }
            Command::ToggleSelect(id) => {
                if self.get(id).is_none() {
                    return Change::None;
                }
                if self.selection.remove(&id) {
                    debug!(id, "deselected");
                    Change::Deselected(id)
                } else {
                    self.selection.insert(id);
                    debug!(id, "selected");
                    Change::Selected(id)
                }
            }
            Command::DeleteOne(id) => self.apply_delete_one(id),
            Command::DeleteSelected => self.apply_delete_selected(),
            Command::DeleteEditing => match self.edit_target {
                Some(id) => self.apply_delete_one(id),
                None => Change::None,
            },
            Command::RequestDelete(id) => {
                if let Some(target) = self.edit_target {
                    self.apply_delete_one(target)
                } else if !self.selection.is_empty() {
                    self.apply_delete_selected()
                } else {
                    self.apply_delete_one(id)
                }
            }
            Command::SetSort(column) => {
                self.sort.toggle(column);
                debug!(sort = %self.sort.describe(), "sort changed");
                Change::Sorted(self.sort)
            }
            Command::ClearSort => {
                self.sort.clear();
                Change::Sorted(self.sort)
            }
        }
    }

    fn apply_submit(&mut self) -> Change {
        let draft = std::mem::take(&mut self.draft);
        let change = match self.edit_target.take() {
            Some(id) => match self.books.iter_mut().find(|b| b.id == id) {
                Some(book) => {
                    book.apply_draft(&draft);
                    info!(id, name = %book.name, "updated book");
                    Change::Updated(id)
                }
                None => Change::None,
            },
            None => {
                let id = self.next_id;
                self.next_id += 1;
                let book = draft.into_book(id);
                info!(id, name = %book.name, "added book");
                self.books.push(book);
                Change::Added(id)
            }
        };
        self.modal_open = false;
        change
    }

    fn apply_delete_one(&mut self, id: BookId) -> Change {
        let before = self.books.len();
        self.books.retain(|b| b.id != id);
        if self.books.len() == before {
            return Change::None;
        }
        self.selection.remove(&id);
        if self.edit_target == Some(id) {
            self.close_modal();
        }
        info!(id, "deleted book");
        Change::Deleted(vec![id])
    }

    fn apply_delete_selected(&mut self) -> Change {
        if self.selection.is_empty() {
            return Change::None;
        }
        let selection = std::mem::take(&mut self.selection);
        let mut removed = Vec::new();
        self.books.retain(|b| {
            if selection.contains(&b.id) {
                removed.push(b.id);
                false
            } else {
                true
            }
        });
        // Leaves edit mode; an open modal falls back to an empty add form
        self.edit_target = None;
        self.draft.clear();
        info!(count = removed.len(), "deleted selected books");
        Change::Deleted(removed)
    }

    fn close_modal(&mut self) {
        self.edit_target = None;
        self.draft.clear();
        self.modal_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::sort::SortOrder;

    fn book(id: BookId, name: &str) -> Book {
        Book {
            id,
            name: name.into(),
            price: String::new(),
            category: String::new(),
            description: String::new(),
        }
    }

    fn three() -> Registry {
        Registry::new(vec![book(1, "One"), book(2, "Two"), book(3, "Three")])
    }

    fn ids(reg: &Registry) -> Vec<BookId> {
        reg.books().iter().map(|b| b.id).collect()
    }

    fn add(reg: &mut Registry, name: &str) -> Change {
        reg.apply(Command::OpenAddModal);
        reg.apply(Command::UpdateDraftField(BookField::Name, name.into()));
        reg.apply(Command::Submit)
    }

    #[test]
    fn test_add_appends_with_fresh_id() {
        let mut reg = three();
        reg.apply(Command::OpenAddModal);
        reg.apply(Command::UpdateDraftField(BookField::Name, "X".into()));
        reg.apply(Command::UpdateDraftField(BookField::Price, "9".into()));
        reg.apply(Command::UpdateDraftField(BookField::Category, "C".into()));
        reg.apply(Command::UpdateDraftField(BookField::Description, "D".into()));
        let change = reg.apply(Command::Submit);

        assert_eq!(change, Change::Added(4));
        assert_eq!(reg.len(), 4);
        let added = reg.get(4).unwrap();
        assert_eq!(
            (added.name.as_str(), added.price.as_str(), added.category.as_str(), added.description.as_str()),
            ("X", "9", "C", "D")
        );
        assert!(!reg.modal_open());
        assert_eq!(reg.draft(), &BookDraft::default());
    }

    #[test]
    fn test_ids_stay_unique_after_deletions() {
        let mut reg = three();
        reg.apply(Command::DeleteOne(1));
        add(&mut reg, "A");
        reg.apply(Command::DeleteOne(4));
        add(&mut reg, "B");
        add(&mut reg, "C");
        let mut all = ids(&reg);
        let len = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), len);
        assert_eq!(ids(&reg), vec![2, 3, 5, 6]);
    }

    #[test]
    fn test_empty_registry_starts_at_one() {
        let mut reg = Registry::default();
        assert_eq!(add(&mut reg, ""), Change::Added(1));
        assert_eq!(reg.get(1).map(|b| b.name.as_str()), Some(""));
    }

    #[test]
    fn test_edit_preserves_identity() {
        let mut reg = three();
        let untouched: Vec<Book> = reg.books().iter().filter(|b| b.id != 3).cloned().collect();

        reg.apply(Command::OpenEditModal(3));
        assert!(reg.is_editing());
        assert_eq!(reg.draft().name, "Three");
        reg.apply(Command::UpdateDraftField(BookField::Name, "Drei".into()));
        assert_eq!(reg.apply(Command::Submit), Change::Updated(3));

        assert_eq!(reg.get(3).unwrap().name, "Drei");
        let others: Vec<Book> = reg.books().iter().filter(|b| b.id != 3).cloned().collect();
        assert_eq!(others, untouched);
        assert!(!reg.is_editing());
        assert!(!reg.modal_open());
    }

    #[test]
    fn test_edit_accepts_empty_fields() {
        let mut reg = three();
        reg.apply(Command::OpenEditModal(2));
        reg.apply(Command::UpdateDraftField(BookField::Name, "".into()));
        reg.apply(Command::Submit);
        assert_eq!(reg.get(2).unwrap().name, "");
    }

    #[test]
    fn test_submit_keeps_selection() {
        let mut reg = three();
        reg.apply(Command::ToggleSelect(1));
        reg.apply(Command::OpenEditModal(2));
        reg.apply(Command::Submit);
        assert!(reg.is_selected(1));
    }

    #[test]
    fn test_open_add_resets_draft_and_target() {
        let mut reg = three();
        reg.apply(Command::OpenEditModal(1));
        reg.apply(Command::OpenAddModal);
        assert_eq!(reg.edit_target(), None);
        assert_eq!(reg.draft(), &BookDraft::default());
        assert!(reg.modal_open());
    }

    #[test]
    fn test_open_edit_unknown_is_noop() {
        let mut reg = three();
        assert!(reg.apply(Command::OpenEditModal(42)).is_none());
        assert!(!reg.modal_open());
    }

    #[test]
    fn test_cancel_leaves_edit_mode() {
        let mut reg = three();
        reg.apply(Command::OpenEditModal(2));
        reg.apply(Command::Cancel);
        assert!(!reg.modal_open());
        assert!(!reg.is_editing());
        assert_eq!(reg.draft(), &BookDraft::default());
    }

    #[test]
    fn test_delete_one() {
        let mut reg = three();
        assert_eq!(reg.apply(Command::DeleteOne(2)), Change::Deleted(vec![2]));
        assert_eq!(ids(&reg), vec![1, 3]);
    }

    #[test]
    fn test_delete_missing_is_silent() {
        let mut reg = three();
        assert!(reg.apply(Command::DeleteOne(9)).is_none());
        assert_eq!(ids(&reg), vec![1, 2, 3]);
    }

    #[test]
    fn test_delete_one_of_edit_target_closes_modal() {
        let mut reg = three();
        reg.apply(Command::OpenEditModal(2));
        reg.apply(Command::DeleteOne(2));
        assert!(!reg.modal_open());
        assert_eq!(reg.edit_target(), None);
        assert_eq!(reg.draft(), &BookDraft::default());
    }

    #[test]
    fn test_delete_one_drops_id_from_selection() {
        let mut reg = three();
        reg.apply(Command::ToggleSelect(2));
        reg.apply(Command::ToggleSelect(3));
        reg.apply(Command::DeleteOne(2));
        assert_eq!(reg.selection().iter().copied().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_bulk_delete() {
        let mut reg = three();
        reg.apply(Command::ToggleSelect(1));
        reg.apply(Command::ToggleSelect(3));
        assert_eq!(reg.apply(Command::DeleteSelected), Change::Deleted(vec![1, 3]));
        assert_eq!(ids(&reg), vec![2]);
        assert!(reg.selection().is_empty());
        assert!(!reg.is_editing());
    }

    #[test]
    fn test_bulk_delete_keeps_modal_open_in_add_mode() {
        let mut reg = three();
        reg.apply(Command::ToggleSelect(1));
        reg.apply(Command::OpenAddModal);
        reg.apply(Command::UpdateDraftField(BookField::Name, "typed".into()));
        reg.apply(Command::DeleteSelected);
        assert!(reg.modal_open());
        assert!(!reg.is_editing());
        assert_eq!(reg.draft(), &BookDraft::default());
        assert_eq!(ids(&reg), vec![2, 3]);
    }

    #[test]
    fn test_bulk_delete_while_editing_falls_back_to_add_mode() {
        let mut reg = three();
        reg.apply(Command::ToggleSelect(3));
        reg.apply(Command::OpenEditModal(1));
        reg.apply(Command::DeleteSelected);
        assert!(reg.modal_open());
        assert_eq!(reg.edit_target(), None);
        assert_eq!(reg.draft(), &BookDraft::default());
        assert_eq!(reg.apply(Command::Submit), Change::Added(4));
    }

    #[test]
    fn test_bulk_delete_with_empty_selection_is_noop() {
        let mut reg = three();
        assert!(reg.apply(Command::DeleteSelected).is_none());
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_toggle_select_twice_deselects() {
        let mut reg = three();
        assert_eq!(reg.apply(Command::ToggleSelect(2)), Change::Selected(2));
        assert_eq!(reg.apply(Command::ToggleSelect(2)), Change::Deselected(2));
        assert!(reg.selection().is_empty());
        assert!(reg.apply(Command::ToggleSelect(77)).is_none());
    }

    #[test]
    fn test_delete_editing_outside_edit_mode_is_noop() {
        let mut reg = three();
        assert!(reg.apply(Command::DeleteEditing).is_none());
        reg.apply(Command::OpenEditModal(1));
        assert_eq!(reg.apply(Command::DeleteEditing), Change::Deleted(vec![1]));
    }

    #[test]
    fn test_request_delete_prefers_edit_target() {
        let mut reg = three();
        reg.apply(Command::ToggleSelect(3));
        reg.apply(Command::OpenEditModal(1));
        reg.apply(Command::RequestDelete(2));
        assert_eq!(ids(&reg), vec![2, 3]);
        assert!(reg.is_selected(3));
    }

    #[test]
    fn test_request_delete_redirects_to_selection() {
        let mut reg = three();
        reg.apply(Command::ToggleSelect(1));
        reg.apply(Command::ToggleSelect(3));
        reg.apply(Command::RequestDelete(2));
        assert_eq!(ids(&reg), vec![2]);
        assert!(reg.selection().is_empty());
    }

    #[test]
    fn test_request_delete_falls_back_to_row() {
        let mut reg = three();
        reg.apply(Command::RequestDelete(2));
        assert_eq!(ids(&reg), vec![1, 3]);
    }

    #[test]
    fn test_sort_twice_same_key_is_idempotent() {
        let reg = Registry::new(vec![book(1, "Banana"), book(2, "Apple"), book(3, "Cherry")])
            .reduce(Command::SetSort(BookField::Name));
        let first: Vec<BookId> = reg.sorted_view().iter().map(|b| b.id).collect();
        let second: Vec<BookId> = reg.sorted_view().iter().map(|b| b.id).collect();
        assert_eq!(first, vec![2, 1, 3]);
        assert_eq!(first, second);

        let reg = reg.reduce(Command::SetSort(BookField::Name));
        let desc: Vec<BookId> = reg.sorted_view().iter().map(|b| b.id).collect();
        assert_eq!(desc, vec![3, 1, 2]);
        assert_eq!(reg.sort().order, SortOrder::Descending);
    }

    #[test]
    fn test_sorting_does_not_reorder_storage() {
        let mut reg = Registry::new(vec![book(1, "B"), book(2, "A")]);
        reg.apply(Command::SetSort(BookField::Name));
        assert_eq!(ids(&reg), vec![1, 2]);
        reg.apply(Command::ClearSort);
        assert_eq!(reg.sort(), SortState::default());
    }
}
