//! Repository layer for book persistence

pub mod books;
pub mod memory;
pub mod query;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::{Book, NewBook},
};

pub use books::PgBooksRepository;
pub use memory::MemoryBooksRepository;
pub use query::{BookQuery, ListParams, Page, PAGE_SIZE};

/// Storage backend for book records.
///
/// Absence is reported as `None`/`false`, never as an error; callers decide
/// whether a missing record is a 404.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books ordered by id
    async fn list_all(&self) -> AppResult<Vec<Book>>;

    /// One page of books matching `query`, ordered by id, with the total match count
    async fn search(&self, query: &BookQuery, case_sensitive: bool) -> AppResult<(Vec<Book>, i64)>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    async fn count(&self) -> AppResult<i64>;

    async fn insert(&self, book: &NewBook) -> AppResult<Book>;

    /// Replace every field of an existing book
    async fn update(&self, id: i32, book: &NewBook) -> AppResult<Option<Book>>;

    /// Returns whether a record was removed
    async fn delete(&self, id: i32) -> AppResult<bool>;

    /// Release backend resources at shutdown
    async fn close(&self) {}
}

/// Shared handle to the configured backend
pub type Repository = Arc<dyn BookRepository>;
