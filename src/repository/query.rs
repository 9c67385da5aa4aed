//! Search and pagination for the book list

use serde::Deserialize;

use crate::models::Book;

/// Number of books shown per list page
pub const PAGE_SIZE: i64 = 10;

/// Columns a search term is matched against
const SEARCH_COLUMNS: [&str; 4] = ["title", "author", "genre", "CAST(year AS TEXT)"];

/// Raw `?search=&page=` values, kept as text so bad input never rejects the request
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub page: Option<String>,
}

/// A normalized list request: trimmed search term and a 1-based page number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookQuery {
    search: String,
    page: i64,
}

impl BookQuery {
    pub fn new(search: impl Into<String>, page: i64) -> Self {
        Self {
            search: search.into().trim().to_string(),
            page: page.max(1),
        }
    }

    /// Build from query-string values; a missing, non-numeric or
    /// non-positive page falls back to page 1.
    pub fn from_params(params: &ListParams) -> Self {
        let page = params
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1);
        Self::new(params.search.as_deref().unwrap_or(""), page)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(PAGE_SIZE)
    }

    /// `%term%` with LIKE wildcards in the term escaped
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.search.len() + 2);
        pattern.push('%');
        for c in self.search.chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }

    /// SQL predicate OR-ing a substring match over every searchable column,
    /// with the pattern bound as `$1`. `None` when the search term is empty.
    pub fn filter_sql(&self, case_sensitive: bool) -> Option<String> {
        if self.search.is_empty() {
            return None;
        }

        let op = if case_sensitive { "LIKE" } else { "ILIKE" };
        let predicates: Vec<String> = SEARCH_COLUMNS
            .iter()
            .map(|column| format!("{} {} $1", column, op))
            .collect();

        Some(format!("({})", predicates.join(" OR ")))
    }

    /// In-memory equivalent of [`BookQuery::filter_sql`]
    pub fn matches(&self, book: &Book, case_sensitive: bool) -> bool {
        if self.search.is_empty() {
            return true;
        }

        let year = book.year_display();
        let fields = [
            book.title.as_str(),
            book.author.as_str(),
            book.genre_display(),
            year.as_str(),
        ];

        if case_sensitive {
            fields.iter().any(|field| field.contains(&self.search))
        } else {
            let term = self.search.to_lowercase();
            fields
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
        }
    }
}

/// Number of pages needed to show `total` books
pub fn total_pages(total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (total + PAGE_SIZE - 1) / PAGE_SIZE
}

/// One page of a filtered listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of records matching the filter across all pages
    pub total: i64,
    pub page: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, query: &BookQuery) -> Self {
        Self {
            items,
            total,
            page: query.page(),
            total_pages: total_pages(total),
        }
    }
}
