//! Seed catalog loading and JSON snapshots.
//!
//! The seed is a JSON array of books loaded once at startup. Nothing is ever
//! written back; [`to_json`] exists so a book list can be captured and
//! reloaded with [`from_json`] without loss.

use super::book::{Book, BookId};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_SEED: &str = include_str!("../../data/books.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid seed data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate book id {0} in seed data")]
    DuplicateId(BookId),
}

/// The catalog shipped with the binary.
pub fn default_books() -> Result<Vec<Book>, SeedError> {
    from_json(DEFAULT_SEED)
}

/// Load the seed from `path`, or the built-in catalog when `None`.
pub fn load(path: Option<&Path>) -> Result<Vec<Book>, SeedError> {
    let Some(path) = path else {
        return default_books();
    };
    let contents = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_json(&contents)
}

/// Parse a book list, rejecting repeated ids.
pub fn from_json(json: &str) -> Result<Vec<Book>, SeedError> {
    let books: Vec<Book> = serde_json::from_str(json)?;
    let mut seen = HashSet::with_capacity(books.len());
    for book in &books {
        if !seen.insert(book.id) {
            return Err(SeedError::DuplicateId(book.id));
        }
    }
    Ok(books)
}

pub fn to_json(books: &[Book]) -> Result<String, SeedError> {
    Ok(serde_json::to_string_pretty(books)?)
}
