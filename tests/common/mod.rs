#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};
use shorturls::application::services::{AuthService, LinkService};
use shorturls::infrastructure::memory::{MemoryLinkRepository, MemorySequenceCounter};
use shorturls::routes::app_routes;
use shorturls::state::AppState;
use shorturls::utils::code_encoder::CodeEncoder;
use std::sync::Arc;

pub const TEST_KEY: &str = "test-key";
pub const TEST_SALT: &str = "test-salt";
pub const TEST_MIN_LENGTH: usize = 5;
pub const TEST_BASE_URL: &str = "https://s.test";

pub fn public_dir() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/public")
}

pub fn test_encoder() -> CodeEncoder {
    CodeEncoder::new(TEST_SALT, TEST_MIN_LENGTH).unwrap()
}

/// State backed by fresh in-memory adapters.
pub fn create_test_state() -> AppState {
    create_test_state_with_start(0)
}

pub fn create_test_state_with_start(counter_start: u64) -> AppState {
    let link_service = LinkService::new(
        Arc::new(MemoryLinkRepository::new()),
        Arc::new(MemorySequenceCounter::new(counter_start)),
        test_encoder(),
        TEST_BASE_URL,
    );

    AppState::new(Arc::new(link_service), Arc::new(AuthService::new(TEST_KEY)))
}

/// Full application router on a fresh in-memory state.
pub fn create_test_server() -> TestServer {
    create_test_server_with(create_test_state())
}

pub fn create_test_server_with(state: AppState) -> TestServer {
    TestServer::new(app_routes(state, public_dir())).unwrap()
}

/// Creates a link through the API and returns the response body.
pub async fn shorten(server: &TestServer, url: &str) -> Value {
    let response = server
        .post("/shorten")
        .add_query_param("key", TEST_KEY)
        .json(&json!({ "url": url }))
        .await;

    response.assert_status_ok();
    response.json::<Value>()
}
