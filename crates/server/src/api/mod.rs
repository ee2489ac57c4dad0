use shared::{
    domain::BookRecord,
    error::{ApiError, ErrorCode},
    protocol::delete_ack,
};
use tracing::info;

use crate::repository::BookRepository;

#[derive(Clone, Default)]
pub struct ApiContext {
    pub books: BookRepository,
}

pub async fn list_books(ctx: &ApiContext) -> Vec<BookRecord> {
    ctx.books.find_all().await
}

/// `None` is sent to the client as a JSON `null` body.
pub async fn get_book(ctx: &ApiContext, id: &str) -> Option<BookRecord> {
    ctx.books.find_by_id(id).await
}

pub async fn add_book(ctx: &ApiContext, book: BookRecord) -> BookRecord {
    info!(book_id = %book.id, title = %book.title, "adding book");
    ctx.books.save(book).await
}

/// The path id selects the row; the body's id is ignored.
pub async fn update_book(ctx: &ApiContext, id: &str, details: BookRecord) -> Option<BookRecord> {
    let updated = ctx.books.update(id, details).await;
    if updated.is_none() {
        info!(book_id = %id, "update for unknown book ignored");
    }
    updated
}

pub async fn delete_book(ctx: &ApiContext, id: &str) -> String {
    let existed = ctx.books.delete_by_id(id).await;
    info!(book_id = %id, existed, "deleted book");
    delete_ack(id)
}

pub fn route_not_found(path: &str) -> ApiError {
    ApiError::new(ErrorCode::NotFound, format!("no route for {path}"))
}

pub fn invalid_book_body(detail: impl Into<String>) -> ApiError {
    ApiError::new(ErrorCode::Validation, detail)
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
