mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::{TEST_KEY, create_test_server, shorten};
use serde_json::Value;

async fn seed(server: &TestServer, urls: &[&str]) -> Vec<String> {
    let mut codes = Vec::with_capacity(urls.len());
    for url in urls {
        let json = shorten(server, url).await;
        codes.push(json["code"].as_str().unwrap().to_string());
    }
    codes
}

async fn list(server: &TestServer, skip: &str, limit: &str) -> Vec<Value> {
    let response = server
        .get("/links")
        .add_query_param("key", TEST_KEY)
        .add_query_param("s", skip)
        .add_query_param("l", limit)
        .await;

    response.assert_status_ok();
    response.json::<Vec<Value>>()
}

fn urls(items: &[Value]) -> Vec<&str> {
    items.iter().map(|i| i["longUrl"].as_str().unwrap()).collect()
}

#[tokio::test]
async fn test_list_pagination_in_creation_order() {
    let server = create_test_server();
    seed(&server, &["https://a.com", "https://b.com", "https://c.com", "https://d.com", "https://e.com"]).await;

    assert_eq!(urls(&list(&server, "0", "2").await), ["https://a.com", "https://b.com"]);
    assert_eq!(urls(&list(&server, "2", "2").await), ["https://c.com", "https://d.com"]);
    assert_eq!(urls(&list(&server, "4", "2").await), ["https://e.com"]);
    assert!(list(&server, "10", "2").await.is_empty());
}

#[tokio::test]
async fn test_list_without_params_returns_all() {
    let server = create_test_server();
    seed(&server, &["https://a.com", "https://b.com", "https://c.com"]).await;

    let response = server.get("/links").add_query_param("key", TEST_KEY).await;

    response.assert_status_ok();
    assert_eq!(response.json::<Vec<Value>>().len(), 3);
}

#[tokio::test]
async fn test_list_non_positive_limit_returns_all() {
    let server = create_test_server();
    seed(&server, &["https://a.com", "https://b.com", "https://c.com"]).await;

    assert_eq!(list(&server, "0", "0").await.len(), 3);
    assert_eq!(list(&server, "-3", "-1").await.len(), 3);
}

#[tokio::test]
async fn test_list_empty_store() {
    let server = create_test_server();

    assert!(list(&server, "0", "10").await.is_empty());
}

#[tokio::test]
async fn test_list_empty_params_return_all() {
    let server = create_test_server();
    seed(&server, &["https://a.com", "https://b.com", "https://c.com"]).await;

    let all = list(&server, "", "").await;
    assert_eq!(urls(&all), ["https://a.com", "https://b.com", "https://c.com"]);
}

#[tokio::test]
async fn test_list_non_numeric_params_read_as_zero() {
    let server = create_test_server();
    seed(&server, &["https://a.com", "https://b.com", "https://c.com"]).await;

    assert_eq!(list(&server, "abc", "ten").await.len(), 3);
    assert_eq!(urls(&list(&server, "x", "1").await), ["https://a.com"]);
}

#[tokio::test]
async fn test_list_requires_key() {
    let server = create_test_server();

    let response = server.get("/links").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_link() {
    let server = create_test_server();
    let codes = seed(&server, &["https://example.com"]).await;

    let response = server
        .get(&format!("/links/{}", codes[0]))
        .add_query_param("key", TEST_KEY)
        .await;

    response.assert_status_ok();
    let json = response.json::<Value>();
    assert_eq!(json["code"], codes[0]);
    assert_eq!(json["longUrl"], "https://example.com");
}

#[tokio::test]
async fn test_get_link_not_found() {
    let server = create_test_server();

    let response = server
        .get("/links/nothere")
        .add_query_param("key", TEST_KEY)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_get_link_requires_key() {
    let server = create_test_server();
    let codes = seed(&server, &["https://example.com"]).await;

    let response = server
        .get(&format!("/links/{}", codes[0]))
        .add_query_param("key", "wrong")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_link() {
    let server = create_test_server();
    let codes = seed(&server, &["https://a.com", "https://b.com"]).await;

    let response = server
        .delete(&format!("/links/{}", codes[0]))
        .add_query_param("key", TEST_KEY)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["deleted"], 1);

    let remaining = list(&server, "0", "10").await;
    assert_eq!(urls(&remaining), ["https://b.com"]);

    let response = server
        .get(&format!("/links/{}", codes[0]))
        .add_query_param("key", TEST_KEY)
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_unknown_link_is_not_found() {
    let server = create_test_server();

    let response = server
        .delete("/links/nothere")
        .add_query_param("key", TEST_KEY)
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_twice() {
    let server = create_test_server();
    let codes = seed(&server, &["https://example.com"]).await;
    let path = format!("/links/{}", codes[0]);

    server
        .delete(&path)
        .add_query_param("key", TEST_KEY)
        .await
        .assert_status_ok();

    server
        .delete(&path)
        .add_query_param("key", TEST_KEY)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_requires_key() {
    let server = create_test_server();
    let codes = seed(&server, &["https://example.com"]).await;

    let response = server.delete(&format!("/links/{}", codes[0])).await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    // still there
    let response = server
        .get(&format!("/links/{}", codes[0]))
        .add_query_param("key", TEST_KEY)
        .await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_deleted_code_is_not_reissued() {
    let server = create_test_server();
    let codes = seed(&server, &["https://a.com"]).await;

    server
        .delete(&format!("/links/{}", codes[0]))
        .add_query_param("key", TEST_KEY)
        .await
        .assert_status_ok();

    let next = seed(&server, &["https://b.com"]).await;
    assert_ne!(next[0], codes[0]);
}
