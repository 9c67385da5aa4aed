//! PostgreSQL repository tests (need a disposable database in DATABASE_URL)

use chrono::Utc;
use sqlx::postgres::PgPoolOptions;

use bookshelf::{
    models::{Book, NewBook},
    repository::{BookQuery, BookRepository, PgBooksRepository},
};

async fn repository() -> PgBooksRepository {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    PgBooksRepository::new(pool)
}

/// Prefix unique to one test run so rows from other runs never match
fn marker() -> String {
    format!("pgt{}", Utc::now().timestamp_nanos_opt().unwrap_or_default())
}

async fn insert(repo: &PgBooksRepository, title: &str) -> Book {
    repo.insert(&NewBook {
        title: title.to_string(),
        author: "Test Author".to_string(),
        genre: None,
        year: None,
    })
    .await
    .expect("Failed to insert book")
}

async fn cleanup(repo: &PgBooksRepository, books: &[Book]) {
    for book in books {
        repo.delete(book.id).await.expect("Failed to delete book");
    }
}

async fn total(repo: &PgBooksRepository, search: &str, case_sensitive: bool) -> i64 {
    let (_, total) = repo
        .search(&BookQuery::new(search, 1), case_sensitive)
        .await
        .expect("Search failed");
    total
}

#[tokio::test]
#[ignore] // Run with: DATABASE_URL=... cargo test -- --ignored
async fn test_pg_search_matches_wildcards_literally() {
    let repo = repository().await;
    let m = marker();

    let mut books = Vec::new();
    for suffix in [
        "100% pure",
        "1000 pure",
        "under_score",
        "underXscore",
        "back\\slash",
        "backslash",
    ] {
        books.push(insert(&repo, &format!("{} {}", m, suffix)).await);
    }

    for case_sensitive in [false, true] {
        assert_eq!(total(&repo, &m, case_sensitive).await, 6);
        assert_eq!(total(&repo, &format!("{} 100%", m), case_sensitive).await, 1);
        assert_eq!(total(&repo, &format!("{} under_", m), case_sensitive).await, 1);
        assert_eq!(total(&repo, &format!("{} back\\", m), case_sensitive).await, 1);
    }

    assert_eq!(total(&repo, &m.to_uppercase(), false).await, 6);
    assert_eq!(total(&repo, &m.to_uppercase(), true).await, 0);

    cleanup(&repo, &books).await;
}

#[tokio::test]
#[ignore]
async fn test_pg_search_pages_with_and_without_filter() {
    let repo = repository().await;
    let m = marker();

    let mut books = Vec::new();
    for i in 1..=12 {
        books.push(insert(&repo, &format!("{} vol {:02}", m, i)).await);
    }

    // Filtered: pattern is $1, LIMIT/OFFSET are $2/$3
    let (page, total) = repo
        .search(&BookQuery::new(m.as_str(), 2), false)
        .await
        .expect("Search failed");
    assert_eq!(total, 12);
    let ids: Vec<i32> = page.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![books[10].id, books[11].id]);

    let (page, _) = repo
        .search(&BookQuery::new(m.as_str(), 3), false)
        .await
        .expect("Search failed");
    assert!(page.is_empty());

    // Unfiltered: LIMIT/OFFSET are $1/$2
    let (page, total) = repo
        .search(&BookQuery::new("", 1), false)
        .await
        .expect("Search failed");
    assert!(total >= 12);
    assert_eq!(page.len(), 10);
    assert!(page.windows(2).all(|pair| pair[0].id < pair[1].id));

    cleanup(&repo, &books).await;
}
