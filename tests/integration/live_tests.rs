//! Smoke tests against a running server

use reqwest::{redirect, Client, StatusCode};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> Client {
    Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .expect("Failed to build client")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_live_home_redirect() {
    let response = client()
        .get(format!("{}/", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()["location"], "/books");
}

#[tokio::test]
#[ignore]
async fn test_live_create_and_list() {
    let client = client();

    let response = client
        .post(format!("{}/books/new", BASE_URL))
        .header("content-type", "application/x-www-form-urlencoded")
        .body("title=Live+Smoke+Test&author=Tester")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::FOUND);

    let body = client
        .get(format!("{}/books?search=Live+Smoke", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body");
    assert!(body.contains("Live Smoke Test"));
}

#[tokio::test]
#[ignore]
async fn test_live_missing_book() {
    let response = client()
        .get(format!("{}/books/999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
