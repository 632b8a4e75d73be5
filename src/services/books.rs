//! Book catalog service

use chrono::Utc;
use rand::Rng;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPayload, BookQuery, BookShort},
    repository::Repository,
};

/// Length of generated book ids
pub const BOOK_ID_LENGTH: usize = 16;

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Messages reported to API clients
pub mod messages {
    pub const CREATED: &str = "Buku berhasil ditambahkan";
    pub const CREATE_FAILED: &str = "Buku gagal ditambahkan";
    pub const NOT_FOUND: &str = "Buku tidak ditemukan";
    pub const UPDATED: &str = "Buku berhasil diperbarui";
    pub const UPDATE_NOT_FOUND: &str = "Gagal memperbarui buku. Id tidak ditemukan";
    pub const DELETED: &str = "Buku berhasil dihapus";
    pub const DELETE_NOT_FOUND: &str = "Buku gagal dihapus. Id tidak ditemukan";

    pub(super) const CREATE_PREFIX: &str = "Gagal menambahkan buku.";
    pub(super) const UPDATE_PREFIX: &str = "Gagal memperbarui buku.";
    pub(super) const MISSING_NAME: &str = "Mohon isi nama buku";
    pub(super) const READ_PAGE_EXCEEDS: &str = "readPage tidak boleh lebih besar dari pageCount";
}

/// Generate a random 16-character id over the URL-safe alphabet
pub fn generate_book_id() -> String {
    let mut rng = rand::thread_rng();
    (0..BOOK_ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect()
}

/// Check a create/update payload. `prefix` names the failed operation.
fn validate(data: &BookPayload, prefix: &str) -> AppResult<()> {
    if data.name.as_deref().map_or(true, str::is_empty) {
        return Err(AppError::Validation(format!("{} {}", prefix, messages::MISSING_NAME)));
    }
    if data.read_page > data.page_count {
        return Err(AppError::Validation(format!(
            "{} {}",
            prefix,
            messages::READ_PAGE_EXCEEDS
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Validate and store a new book, returning its id
    pub async fn create(&self, data: BookPayload) -> AppResult<String> {
        validate(&data, messages::CREATE_PREFIX)?;

        let id = generate_book_id();
        let book = Book::new(id.clone(), data, Utc::now());
        self.repository
            .books_insert(book, messages::CREATE_FAILED)
            .await?;

        tracing::info!("Book created: id={}", id);
        Ok(id)
    }

    /// List books matching the filters
    pub async fn list(&self, query: &BookQuery) -> Vec<BookShort> {
        self.repository.books_search(query).await
    }

    /// Get a book with all its fields
    pub async fn get_by_id(&self, id: &str) -> AppResult<Book> {
        self.repository.books_get_by_id(id).await.ok_or_else(|| {
            tracing::debug!("Book not found: id={}", id);
            AppError::NotFound(messages::NOT_FOUND.to_string())
        })
    }

    /// Replace the editable fields of a book.
    ///
    /// The payload is validated before the id is looked up, so an invalid
    /// payload for an unknown id reports the validation failure.
    pub async fn update(&self, id: &str, data: BookPayload) -> AppResult<()> {
        validate(&data, messages::UPDATE_PREFIX)?;

        let now = Utc::now();
        let updated = self
            .repository
            .books_update(id, |book| book.apply(data, now))
            .await;

        if !updated {
            tracing::debug!("Book not found for update: id={}", id);
            return Err(AppError::NotFound(messages::UPDATE_NOT_FOUND.to_string()));
        }

        tracing::info!("Book updated: id={}", id);
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if !self.repository.books_delete(id).await {
            tracing::debug!("Book not found for delete: id={}", id);
            return Err(AppError::NotFound(messages::DELETE_NOT_FOUND.to_string()));
        }

        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }

    /// Number of books in the catalog
    pub async fn count(&self) -> usize {
        self.repository.books_count().await
    }
}
