mod common;

use axum::body::Bytes;
use axum::http::StatusCode;
use serde_json::{Value, json};
use snaplink::domain::repositories::LinkStore;

#[tokio::test]
async fn test_shorten_success() {
    let (server, store) = common::create_test_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "originalUrl": "https://example.com/some/long/path" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["originalUrl"], "https://example.com/some/long/path");

    let code = body["shortUrl"].as_str().unwrap();
    assert_eq!(code.len(), 7);

    let stored = store.find_by_code(code).await.unwrap().unwrap();
    assert_eq!(stored.original_url, "https://example.com/some/long/path");
    assert_eq!(stored.clicks, 0);
}

#[tokio::test]
async fn test_shorten_same_url_twice_gives_two_codes() {
    let (server, store) = common::create_test_server();
    let payload = json!({ "originalUrl": "https://a.test" });

    let first: Value = server.post("/api/shorten").json(&payload).await.json();
    let second: Value = server.post("/api/shorten").json(&payload).await.json();

    assert_ne!(first["shortUrl"], second["shortUrl"]);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_shorten_stores_url_verbatim() {
    let (server, _store) = common::create_test_server();
    let url = "https://a.test/path?q=1&r=two#frag";

    let body: Value = server
        .post("/api/shorten")
        .json(&json!({ "originalUrl": url }))
        .await
        .json();

    assert_eq!(body["originalUrl"], url);

    let code = body["shortUrl"].as_str().unwrap();
    let response = server.get(&format!("/{code}")).await;
    assert_eq!(response.header("location"), url);
}

#[tokio::test]
async fn test_shorten_empty_url_rejected() {
    let (server, store) = common::create_test_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "originalUrl": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_shorten_blank_url_rejected() {
    let (server, store) = common::create_test_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "originalUrl": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_shorten_control_characters_rejected() {
    let (server, store) = common::create_test_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "originalUrl": "https://a.test/\r\nSet-Cookie: x=1" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["details"]["field"], "originalUrl");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_shorten_missing_field_rejected() {
    let (server, store) = common::create_test_server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://a.test" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_shorten_malformed_json_rejected() {
    let (server, _store) = common::create_test_server();

    let response = server
        .post("/api/shorten")
        .bytes(Bytes::from_static(b"{not json"))
        .content_type("application/json")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
}
