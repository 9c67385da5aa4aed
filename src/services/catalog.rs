//! Catalog service: validation and persistence rules for books

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{Book, BookForm, SaveOutcome},
    repository::{BookQuery, Page, Repository},
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
    case_sensitive_search: bool,
}

impl CatalogService {
    pub fn new(repository: Repository, config: &CatalogConfig) -> Self {
        Self {
            repository,
            case_sensitive_search: config.case_sensitive_search,
        }
    }

    /// All books ordered by id
    pub async fn list_all(&self) -> AppResult<Vec<Book>> {
        self.repository.list_all().await
    }

    /// One page of books matching the query's search term
    pub async fn list_filtered(&self, query: &BookQuery) -> AppResult<Page<Book>> {
        let (books, total) = self
            .repository
            .search(query, self.case_sensitive_search)
            .await?;
        Ok(Page::new(books, total, query))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        self.repository.get_by_id(id).await
    }

    pub async fn count(&self) -> AppResult<i64> {
        self.repository.count().await
    }

    /// Create a book; an invalid form is echoed back and nothing is written.
    pub async fn create(&self, form: BookForm) -> AppResult<SaveOutcome> {
        let form = form.trimmed();
        let book = match form.check() {
            Ok(book) => book,
            Err(errors) => return Ok(SaveOutcome::Invalid { form, errors }),
        };

        let created = self.repository.insert(&book).await?;
        tracing::info!("Created book id={} title={:?}", created.id, created.title);
        Ok(SaveOutcome::Saved(created))
    }

    /// Replace every field of an existing book
    pub async fn update(&self, id: i32, form: BookForm) -> AppResult<SaveOutcome> {
        let form = form.trimmed();
        let book = match form.check() {
            Ok(book) => book,
            Err(errors) => return Ok(SaveOutcome::Invalid { form, errors }),
        };

        let updated = self
            .repository
            .update(id, &book)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;
        tracing::info!("Updated book id={}", updated.id);
        Ok(SaveOutcome::Saved(updated))
    }

    /// Permanently remove a book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }
}
