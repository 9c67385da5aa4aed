//! HTTP routes for the Bookshelf pages

pub mod books;
pub mod health;

use std::any::Any;

use axum::{
    http::{Method, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};

use crate::{error::AppError, AppState};

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.catalog.static_dir);

    // Methods a route does not handle land on the same 404 page as unknown paths.
    Router::new()
        .route("/", get(books::home).fallback(fallback))
        .route("/health", get(health::health_check).fallback(fallback))
        .route("/ready", get(health::readiness_check).fallback(fallback))
        .route(
            "/books",
            get(books::list_books)
                .post(books::search_books)
                .fallback(fallback),
        )
        .route(
            "/books/new",
            get(books::new_book_form)
                .post(books::create_book)
                .fallback(fallback),
        )
        .route(
            "/books/:id",
            get(books::edit_book_form)
                .post(books::update_book)
                .fallback(fallback),
        )
        .route(
            "/books/:id/delete",
            get(books::delete_book_form)
                .post(books::delete_book)
                .fallback(fallback),
        )
        .nest_service("/static", static_files)
        .fallback(fallback)
        .with_state(state)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}

/// Unmatched routes and methods
pub async fn fallback(method: Method, uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {} {}", method, uri))
}

/// Turn a panic inside a handler into the generic 500 page
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    AppError::Internal(format!("Handler panicked: {}", detail)).into_response()
}
