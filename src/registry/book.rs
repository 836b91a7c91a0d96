use serde::{Deserialize, Serialize};

pub type BookId = u64;

/// One catalog item.
///
/// `price` is free text and is never parsed; sorting by price is lexicographic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
}

impl Book {
    pub fn field(&self, field: BookField) -> &str {
        match field {
            BookField::Name => &self.name,
            BookField::Price => &self.price,
            BookField::Category => &self.category,
            BookField::Description => &self.description,
        }
    }

    /// Overwrite the four editable fields, keeping the id.
    pub fn apply_draft(&mut self, draft: &BookDraft) {
        self.name = draft.name.clone();
        self.price = draft.price.clone();
        self.category = draft.category.clone();
        self.description = draft.description.clone();
    }
}

/// The editable fields of a book, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookField {
    Name,
    Price,
    Category,
    Description,
}

impl BookField {
    pub const ALL: [BookField; 4] = [
        BookField::Name,
        BookField::Price,
        BookField::Category,
        BookField::Description,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BookField::Name => "Name",
            BookField::Price => "Price",
            BookField::Category => "Category",
            BookField::Description => "Description",
        }
    }

    pub fn next(self) -> Self {
        match self {
            BookField::Name => BookField::Price,
            BookField::Price => BookField::Category,
            BookField::Category => BookField::Description,
            BookField::Description => BookField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            BookField::Name => BookField::Description,
            BookField::Price => BookField::Name,
            BookField::Category => BookField::Price,
            BookField::Description => BookField::Category,
        }
    }
}

/// In-progress form values bound to the add/edit modal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub name: String,
    pub price: String,
    pub category: String,
    pub description: String,
}

impl BookDraft {
    pub fn from_book(book: &Book) -> Self {
        Self {
            name: book.name.clone(),
            price: book.price.clone(),
            category: book.category.clone(),
            description: book.description.clone(),
        }
    }

    pub fn get(&self, field: BookField) -> &str {
        match field {
            BookField::Name => &self.name,
            BookField::Price => &self.price,
            BookField::Category => &self.category,
            BookField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: BookField, value: String) {
        match field {
            BookField::Name => self.name = value,
            BookField::Price => self.price = value,
            BookField::Category => self.category = value,
            BookField::Description => self.description = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn into_book(self, id: BookId) -> Book {
        Book {
            id,
            name: self.name,
            price: self.price,
            category: self.category,
            description: self.description,
        }
    }
}
