//! Error types for the Bookshelf server

use askama::Template;
use axum::{
    extract::rejection::{FormRejection, PathRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::views::{ErrorView, NotFoundView};

/// Main application error type.
///
/// Form validation failures are not errors: they come back from the catalog
/// as [`crate::models::book::SaveOutcome::Invalid`] and are re-rendered in place.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A request the extractors could not accept, with the status they chose
    #[error("Rejected request ({0}): {1}")]
    Rejected(StatusCode, String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Rejected(status, _) => *status,
            AppError::Database(_) | AppError::Template(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let page = if status == StatusCode::NOT_FOUND {
            tracing::warn!("{}", self);
            NotFoundView.render()
        } else if status.is_client_error() {
            tracing::warn!("{}", self);
            ErrorView::new(status).render()
        } else {
            tracing::error!("{}", self);
            ErrorView::new(status).render()
        };

        match page {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render error page: {}", e);
                let reason = status.canonical_reason().unwrap_or("Error");
                (status, reason).into_response()
            }
        }
    }
}

/// A path segment that cannot be decoded cannot name a book.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::NotFound(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Rejected(rejection.status(), rejection.body_text())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
