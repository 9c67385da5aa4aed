//! PostgreSQL books repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{BookQuery, BookRepository};
use crate::{
    error::AppResult,
    models::{Book, NewBook},
};

const COLUMNS: &str = "id, title, author, genre, year, created_at, updated_at";

#[derive(Clone)]
pub struct PgBooksRepository {
    pool: Pool<Postgres>,
}

impl PgBooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBooksRepository {
    async fn list_all(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books ORDER BY id", COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    async fn search(&self, query: &BookQuery, case_sensitive: bool) -> AppResult<(Vec<Book>, i64)> {
        let filter = query.filter_sql(case_sensitive);

        // The search pattern takes $1 when present; LIMIT/OFFSET follow it.
        let (where_clause, next_param) = match &filter {
            Some(predicate) => (format!("WHERE {}", predicate), 2),
            None => (String::new(), 1),
        };

        let count_query = format!("SELECT COUNT(*) FROM books {}", where_clause);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        if filter.is_some() {
            count = count.bind(query.like_pattern());
        }
        let total = count.fetch_one(&self.pool).await?;

        let select_query = format!(
            "SELECT {} FROM books {} ORDER BY id LIMIT ${} OFFSET ${}",
            COLUMNS,
            where_clause,
            next_param,
            next_param + 1
        );
        let mut select = sqlx::query_as::<_, Book>(&select_query);
        if filter.is_some() {
            select = select.bind(query.like_pattern());
        }
        let books = select
            .bind(query.limit())
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((books, total))
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books WHERE id = $1", COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (title, author, genre, year)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.year)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, book: &NewBook) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(&format!(
            r#"
            UPDATE books
            SET title = $1, author = $2, genre = $3, year = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            COLUMNS
        ))
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.year)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
