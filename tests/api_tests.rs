//! API integration tests

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

async fn create_member(client: &Client) -> i64 {
    let response = client
        .post(format!("{}/members", BASE_URL))
        .json(&json!({
            "name": "Test Member",
            "email": format!("member-{}@example.org", std::process::id()),
            "address": "1 Test Street"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No member ID")
}

async fn create_book(client: &Client, available: i64) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Test Book",
            "publication_year": 1984,
            "available": available,
            "author_ids": []
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No book ID")
}

async fn book_available(client: &Client, book_id: i64) -> i64 {
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    body["available"].as_i64().expect("No available count")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_loan_roundtrip_adjusts_availability() {
    let client = Client::new();
    let member_id = create_member(&client).await;
    let book_id = create_book(&client, 1).await;

    // Borrow the last copy
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({
            "book_id": book_id,
            "member_id": member_id,
            "min_return_days": 7,
            "max_return_days": 21
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let loan_id = body["id"].as_i64().expect("No loan ID");

    assert_eq!(book_available(&client, book_id).await, 0);

    // A second borrow is refused
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({
            "book_id": book_id,
            "member_id": member_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Return the copy
    let response = client
        .delete(format!("{}/loans/{}", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    assert_eq!(book_available(&client, book_id).await, 1);

    // A second return of the same loan is NotFound
    let response = client
        .delete(format!("{}/loans/{}", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    // Cleanup
    let _ = client.delete(format!("{}/books/{}", BASE_URL, book_id)).send().await;
    let _ = client
        .delete(format!("{}/members/{}", BASE_URL, member_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_empty_patch_is_rejected() {
    let client = Client::new();
    let member_id = create_member(&client).await;
    let book_id = create_book(&client, 1).await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({
            "book_id": book_id,
            "member_id": member_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    let loan_id = body["id"].as_i64().expect("No loan ID");

    let response = client
        .patch(format!("{}/loans/{}", BASE_URL, loan_id))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "EmptyUpdate");

    // Cleanup
    let _ = client.delete(format!("{}/loans/{}", BASE_URL, loan_id)).send().await;
    let _ = client.delete(format!("{}/books/{}", BASE_URL, book_id)).send().await;
    let _ = client
        .delete(format!("{}/members/{}", BASE_URL, member_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_create_loan_for_unknown_book_is_not_found() {
    let client = Client::new();
    let member_id = create_member(&client).await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({
            "book_id": 999_999,
            "member_id": member_id
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "NoSuchBook");

    let _ = client
        .delete(format!("{}/members/{}", BASE_URL, member_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_availability_adjust_endpoint() {
    let client = Client::new();
    let book_id = create_book(&client, 2).await;

    let response = client
        .post(format!("{}/books/{}/availability", BASE_URL, book_id))
        .json(&json!({ "delta": 3 }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["available"], 5);

    // Driving the count below zero is refused
    let response = client
        .post(format!("{}/books/{}/availability", BASE_URL, book_id))
        .json(&json!({ "delta": -6 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let _ = client.delete(format!("{}/books/{}", BASE_URL, book_id)).send().await;
}
