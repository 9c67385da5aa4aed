//! Book catalog pages

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookForm, SaveOutcome},
    repository::{BookQuery, ListParams},
    views::{self, BookListView, DeleteBookView, NewBookView, UpdateBookView},
    AppState,
};

const BOOKS_PATH: &str = "/books";

/// 302 back to the book list
fn redirect_to_list() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, BOOKS_PATH)]).into_response()
}

/// Ids that are not numbers cannot exist, so they are reported like missing books.
fn parse_id(raw: &str) -> AppResult<i32> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("Book {} not found", raw)))
}

async fn load_book(state: &AppState, raw_id: &str) -> AppResult<Book> {
    let id = parse_id(raw_id)?;
    state
        .services
        .catalog
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
}

async fn render_list(state: &AppState, query: BookQuery) -> AppResult<Response> {
    let page = state.services.catalog.list_filtered(&query).await?;
    let view = BookListView::new(page, query.search());
    Ok(views::render(&view)?.into_response())
}

/// GET / - the catalog lives under /books
pub async fn home() -> Response {
    redirect_to_list()
}

/// GET /books - list with optional `search` and `page`
/// An unreadable query string (e.g. a repeated `page`) lists page 1 unfiltered.
pub async fn list_books(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> AppResult<Response> {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::debug!("Ignoring list parameters: {}", rejection.body_text());
            ListParams::default()
        }
    };
    render_list(&state, BookQuery::from_params(&params)).await
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search: String,
}

/// POST /books - search form submitted from the list page
pub async fn search_books(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<SearchForm>, AppError>,
) -> AppResult<Response> {
    render_list(&state, BookQuery::new(form.search, 1)).await
}

/// GET /books/new
pub async fn new_book_form() -> AppResult<Response> {
    let view = NewBookView {
        form: BookForm::default(),
        errors: Vec::new(),
    };
    Ok(views::render(&view)?.into_response())
}

/// POST /books/new
pub async fn create_book(
    State(state): State<AppState>,
    WithRejection(Form(form), _): WithRejection<Form<BookForm>, AppError>,
) -> AppResult<Response> {
    match state.services.catalog.create(form).await? {
        SaveOutcome::Saved(_) => Ok(redirect_to_list()),
        SaveOutcome::Invalid { form, errors } => {
            let view = NewBookView { form, errors };
            Ok(views::render(&view)?.into_response())
        }
    }
}

/// GET /books/:id - detail page with the update form
pub async fn edit_book_form(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Response> {
    let book = load_book(&state, &id).await?;
    let view = UpdateBookView::new(&book, BookForm::from(&book), Vec::new());
    Ok(views::render(&view)?.into_response())
}

/// POST /books/:id
pub async fn update_book(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
    WithRejection(Form(form), _): WithRejection<Form<BookForm>, AppError>,
) -> AppResult<Response> {
    let book = load_book(&state, &id).await?;

    match state.services.catalog.update(book.id, form).await? {
        SaveOutcome::Saved(_) => Ok(redirect_to_list()),
        SaveOutcome::Invalid { form, errors } => {
            let view = UpdateBookView::new(&book, form, errors);
            Ok(views::render(&view)?.into_response())
        }
    }
}

/// GET /books/:id/delete - confirmation page
pub async fn delete_book_form(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Response> {
    let book = load_book(&state, &id).await?;
    Ok(views::render(&DeleteBookView { book })?.into_response())
}

/// POST /books/:id/delete
pub async fn delete_book(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<String>, AppError>,
) -> AppResult<Response> {
    let book = load_book(&state, &id).await?;
    state.services.catalog.delete(book.id).await?;
    Ok(redirect_to_list())
}
