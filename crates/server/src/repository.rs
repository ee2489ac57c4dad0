use std::{collections::BTreeMap, sync::Arc};

use shared::domain::BookRecord;
use tokio::sync::RwLock;

/// In-memory book table keyed (and therefore listed) by id.
#[derive(Clone, Default)]
pub struct BookRepository {
    books: Arc<RwLock<BTreeMap<String, BookRecord>>>,
}

impl BookRepository {
    pub fn with_books(books: impl IntoIterator<Item = BookRecord>) -> Self {
        Self {
            books: Arc::new(RwLock::new(
                books
                    .into_iter()
                    .map(|book| (book.id.clone(), book))
                    .collect(),
            )),
        }
    }

    pub async fn find_all(&self) -> Vec<BookRecord> {
        self.books.read().await.values().cloned().collect()
    }

    pub async fn find_by_id(&self, id: &str) -> Option<BookRecord> {
        self.books.read().await.get(id).cloned()
    }

    /// Inserts or replaces the book stored under `book.id`.
    pub async fn save(&self, book: BookRecord) -> BookRecord {
        self.books
            .write()
            .await
            .insert(book.id.clone(), book.clone());
        book
    }

    /// Replaces every column except the id; `None` when `id` is unknown.
    pub async fn update(&self, id: &str, details: BookRecord) -> Option<BookRecord> {
        let mut books = self.books.write().await;
        let stored = books.get_mut(id)?;
        stored.title = details.title;
        stored.author = details.author;
        stored.publisher = details.publisher;
        stored.year = details.year;
        stored.genre = details.genre;
        Some(stored.clone())
    }

    /// Removing an unknown id is not an error.
    pub async fn delete_by_id(&self, id: &str) -> bool {
        self.books.write().await.remove(id).is_some()
    }

    #[cfg(test)]
    pub async fn count(&self) -> usize {
        self.books.read().await.len()
    }
}
