//! HTML views rendered with askama (templates live in `templates/`)

use askama::Template;
use axum::{http::StatusCode, response::Html};

use crate::{
    error::AppResult,
    models::{Book, BookForm, FieldError},
    repository::Page,
};

/// Render a view into an HTML response body
pub fn render<T: Template>(view: &T) -> AppResult<Html<String>> {
    Ok(Html(view.render()?))
}

/// A numbered link in the list pagination bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub number: i64,
    pub current: bool,
}

#[derive(Template)]
#[template(path = "books/index.html")]
pub struct BookListView {
    pub books: Vec<Book>,
    pub total: i64,
    pub current_page: i64,
    pub total_pages: i64,
    pub pages: Vec<PageLink>,
    pub search: String,
}

impl BookListView {
    pub fn new(page: Page<Book>, search: &str) -> Self {
        let pages = (1..=page.total_pages)
            .map(|number| PageLink {
                number,
                current: number == page.page,
            })
            .collect();

        Self {
            books: page.items,
            total: page.total,
            current_page: page.page,
            total_pages: page.total_pages,
            pages,
            search: search.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "books/new.html")]
pub struct NewBookView {
    pub form: BookForm,
    pub errors: Vec<FieldError>,
}

#[derive(Template)]
#[template(path = "books/update.html")]
pub struct UpdateBookView {
    pub id: i32,
    pub form: BookForm,
    pub errors: Vec<FieldError>,
    pub added: String,
    pub modified: String,
}

impl UpdateBookView {
    pub fn new(book: &Book, form: BookForm, errors: Vec<FieldError>) -> Self {
        Self {
            id: book.id,
            form,
            errors,
            added: book.created_at.format("%Y-%m-%d %H:%M").to_string(),
            modified: book.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "books/delete.html")]
pub struct DeleteBookView {
    pub book: Book,
}

#[derive(Template)]
#[template(path = "page_not_found.html")]
pub struct NotFoundView;

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorView {
    pub status: u16,
    pub heading: &'static str,
    pub message: &'static str,
}

impl ErrorView {
    pub fn new(status: StatusCode) -> Self {
        if status.is_client_error() {
            return Self {
                status: status.as_u16(),
                heading: "Bad Request",
                message: "Sorry! The request could not be understood.",
            };
        }

        Self {
            status: status.as_u16(),
            heading: "Server Error",
            message: "Sorry! There was an unexpected error on the server.",
        }
    }
}
