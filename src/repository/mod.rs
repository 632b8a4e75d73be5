//! Repository layer: the in-memory book catalog

pub mod books;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::Book;

/// Main repository struct holding the shared book collection.
///
/// Clones share the same collection. Every access goes through one
/// reader/writer lock, so concurrent requests never observe a half-applied
/// mutation.
#[derive(Clone, Default)]
pub struct Repository {
    books: Arc<RwLock<Vec<Book>>>,
}

impl Repository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}
