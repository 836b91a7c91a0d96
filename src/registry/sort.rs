//! Column sorting and the sorted projection used for rendering.

use super::book::{Book, BookField, BookId};
use std::cmp::Ordering;

/// Sortable columns are exactly the editable book fields.
pub type SortColumn = BookField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn flipped(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortOrder::Ascending => "▲",
            SortOrder::Descending => "▼",
        }
    }
}

/// Current sort key and direction. `column == None` means insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<SortColumn>,
    pub order: SortOrder,
}

impl SortState {
    /// Same column flips the order; a new column starts ascending.
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == Some(column) {
            self.order = self.order.flipped();
        } else {
            self.column = Some(column);
            self.order = SortOrder::Ascending;
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        let Some(column) = self.column else {
            return Ordering::Equal;
        };
        let ord = a.field(column).cmp(b.field(column));
        match self.order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    }

    pub fn describe(&self) -> String {
        match self.column {
            Some(col) => format!("{} {}", col.label(), self.order.arrow()),
            None => "none".to_string(),
        }
    }
}

/// Sorted projection over a book slice.
///
/// Nothing is ordered until [`SortedView::iter`] is called, and every call
/// starts a fresh pass, so a view can be iterated any number of times.
#[derive(Debug, Clone, Copy)]
pub struct SortedView<'a> {
    books: &'a [Book],
    sort: SortState,
}

impl<'a> SortedView<'a> {
    pub fn new(books: &'a [Book], sort: SortState) -> Self {
        Self { books, sort }
    }

    pub fn iter(&self) -> std::vec::IntoIter<&'a Book> {
        let mut rows: Vec<&'a Book> = self.books.iter().collect();
        if self.sort.column.is_some() {
            let sort = self.sort;
            rows.sort_by(|a, b| sort.compare(a, b));
        }
        rows.into_iter()
    }

    /// Row at a display position.
    pub fn get(&self, index: usize) -> Option<&'a Book> {
        self.iter().nth(index)
    }

    pub fn position_of(&self, id: BookId) -> Option<usize> {
        self.iter().position(|b| b.id == id)
    }
}

impl<'a> IntoIterator for &SortedView<'a> {
    type Item = &'a Book;
    type IntoIter = std::vec::IntoIter<&'a Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
