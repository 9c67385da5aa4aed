//! In-process books repository, used by tests and `database.url = "memory"`

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{BookQuery, BookRepository};
use crate::{
    error::AppResult,
    models::{Book, NewBook},
};

#[derive(Default)]
struct State {
    last_id: i32,
    books: BTreeMap<i32, Book>,
}

#[derive(Default)]
pub struct MemoryBooksRepository {
    state: RwLock<State>,
}

impl MemoryBooksRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for MemoryBooksRepository {
    async fn list_all(&self) -> AppResult<Vec<Book>> {
        let state = self.state.read().await;
        Ok(state.books.values().cloned().collect())
    }

    async fn search(&self, query: &BookQuery, case_sensitive: bool) -> AppResult<(Vec<Book>, i64)> {
        let state = self.state.read().await;
        let matching: Vec<&Book> = state
            .books
            .values()
            .filter(|book| query.matches(book, case_sensitive))
            .collect();

        let total = matching.len() as i64;
        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit()).unwrap_or(0);
        let books = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        Ok((books, total))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let state = self.state.read().await;
        Ok(state.books.get(&id).cloned())
    }

    async fn count(&self) -> AppResult<i64> {
        let state = self.state.read().await;
        Ok(state.books.len() as i64)
    }

    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let mut state = self.state.write().await;
        state.last_id += 1;

        let now = Utc::now();
        let stored = Book {
            id: state.last_id,
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            year: book.year,
            created_at: now,
            updated_at: now,
        };
        state.books.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i32, book: &NewBook) -> AppResult<Option<Book>> {
        let mut state = self.state.write().await;
        let Some(stored) = state.books.get_mut(&id) else {
            return Ok(None);
        };

        stored.title = book.title.clone();
        stored.author = book.author.clone();
        stored.genre = book.genre.clone();
        stored.year = book.year;
        stored.updated_at = Utc::now();
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut state = self.state.write().await;
        Ok(state.books.remove(&id).is_some())
    }
}
