//! Book domain methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, BookShort},
};

impl Repository {
    /// List books matching the query, in insertion order
    pub async fn books_search(&self, query: &BookQuery) -> Vec<BookShort> {
        let filter = BookFilter::from(query);
        let books = self.books.read().await;

        books
            .iter()
            .filter(|book| filter.matches(book))
            .map(BookShort::from)
            .collect()
    }

    /// Get book by ID
    pub async fn books_get_by_id(&self, id: &str) -> Option<Book> {
        let books = self.books.read().await;
        books.iter().find(|book| book.id == id).cloned()
    }

    /// Append a book, then check that its id is held by exactly one record.
    ///
    /// On a collision the appended record is removed again and an
    /// `Internal` error carrying `failure_message` is returned.
    pub async fn books_insert(&self, book: Book, failure_message: &str) -> AppResult<()> {
        let mut books = self.books.write().await;
        let id = book.id.clone();
        books.push(book);

        let copies = books.iter().filter(|b| b.id == id).count();
        if copies != 1 {
            books.pop();
            tracing::error!("Book id {} is held by {} records after insert", id, copies);
            return Err(AppError::Internal(failure_message.to_string()));
        }
        Ok(())
    }

    /// Apply `update` to the book with the given id.
    /// Returns false when no book matches.
    pub async fn books_update<F>(&self, id: &str, update: F) -> bool
    where
        F: FnOnce(&mut Book),
    {
        let mut books = self.books.write().await;
        match books.iter_mut().find(|book| book.id == id) {
            Some(book) => {
                update(book);
                true
            }
            None => false,
        }
    }

    /// Delete book. Returns false when no book matches.
    pub async fn books_delete(&self, id: &str) -> bool {
        let mut books = self.books.write().await;
        match books.iter().position(|book| book.id == id) {
            Some(index) => {
                books.remove(index);
                true
            }
            None => false,
        }
    }

    pub async fn books_count(&self) -> usize {
        self.books.read().await.len()
    }
}

/// Normalised list filters.
///
/// Empty query values mean "no constraint". `reading` and `finished` are
/// compared numerically against the record's flag taken as 1 or 0.
#[derive(Debug)]
struct BookFilter {
    name: Option<String>,
    reading: Option<FlagFilter>,
    finished: Option<FlagFilter>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FlagFilter {
    Is(bool),
    /// The value is not 0 or 1 (or not a number at all): nothing matches
    Never,
}

impl FlagFilter {
    fn parse(raw: &str) -> Self {
        // A whitespace-only value counts as 0
        let trimmed = raw.trim();
        let value = if trimmed.is_empty() {
            Some(0.0)
        } else {
            trimmed.parse::<f64>().ok()
        };

        match value {
            Some(v) if v == 0.0 => FlagFilter::Is(false),
            Some(v) if v == 1.0 => FlagFilter::Is(true),
            _ => FlagFilter::Never,
        }
    }

    fn matches(self, flag: bool) -> bool {
        match self {
            FlagFilter::Is(expected) => expected == flag,
            FlagFilter::Never => false,
        }
    }
}

impl From<&BookQuery> for BookFilter {
    fn from(query: &BookQuery) -> Self {
        Self {
            name: non_empty(&query.name).map(str::to_lowercase),
            reading: non_empty(&query.reading).map(FlagFilter::parse),
            finished: non_empty(&query.finished).map(FlagFilter::parse),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl BookFilter {
    fn matches(&self, book: &Book) -> bool {
        if let Some(ref name) = self.name {
            if !book.name.to_lowercase().contains(name.as_str()) {
                return false;
            }
        }
        if let Some(reading) = self.reading {
            if !reading.matches(book.reading) {
                return false;
            }
        }
        if let Some(finished) = self.finished {
            if !finished.matches(book.finished) {
                return false;
            }
        }
        true
    }
}
