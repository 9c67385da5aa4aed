//! Book model

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::FromRow;
use validator::{Validate, ValidationError, ValidationErrors};

/// Form fields in the order their errors are reported.
const FIELDS: [&str; 4] = ["title", "author", "genre", "year"];

/// Persisted book record
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn genre_display(&self) -> &str {
        self.genre.as_deref().unwrap_or("")
    }

    pub fn year_display(&self) -> String {
        self.year.map(|year| year.to_string()).unwrap_or_default()
    }
}

/// Book fields as submitted through the create and update forms.
///
/// Every field is kept as raw text so a rejected submission can be shown back
/// to the user exactly as it was typed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct BookForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "\"Title\" is required"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "\"Author\" is required"))]
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    #[validate(custom(function = "validate_year"))]
    pub year: String,
}

fn validate_year(year: &str) -> Result<(), ValidationError> {
    if year.is_empty() || year.parse::<i32>().is_ok() {
        return Ok(());
    }
    let mut error = ValidationError::new("year");
    error.message = Some(Cow::Borrowed("\"Year\" must be a whole number"));
    Err(error)
}

impl BookForm {
    /// Strip surrounding whitespace from every field
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            genre: self.genre.trim().to_string(),
            year: self.year.trim().to_string(),
        }
    }

    /// Validate the form and convert it to the values that get persisted.
    pub fn check(&self) -> Result<NewBook, Vec<FieldError>> {
        if let Err(errors) = self.validate() {
            return Err(FieldError::collect(&errors));
        }

        Ok(NewBook {
            title: self.title.clone(),
            author: self.author.clone(),
            genre: (!self.genre.is_empty()).then(|| self.genre.clone()),
            year: self.year.parse().ok(),
        })
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre_display().to_string(),
            year: book.year_display(),
        }
    }
}

/// Validated field values for an insert or a full-record update
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub year: Option<i32>,
}

/// One validation message for one form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    /// Flatten validator output to one message per field, in form order.
    fn collect(errors: &ValidationErrors) -> Vec<FieldError> {
        let by_field = errors.field_errors();

        FIELDS
            .into_iter()
            .filter_map(|field| {
                let first = by_field.get(field)?.first()?;
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("\"{}\" is invalid", field));
                Some(FieldError { field, message })
            })
            .collect()
    }
}

/// Result of a create or update: either the stored record, or the submitted
/// form echoed back with its field errors. Nothing is written in the second case.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(Book),
    Invalid {
        form: BookForm,
        errors: Vec<FieldError>,
    },
}
